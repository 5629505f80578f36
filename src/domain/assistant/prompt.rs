//! System instruction and deterministic fallback texts.

use super::api_result::{render_results, ApiCallResult};

/// Returned when the model is unreachable and no API data was retrieved.
pub const APOLOGY_FALLBACK: &str = "I apologize, but I'm having trouble connecting to the AI service right now. Please try again later or contact your system administrator.";

const RAW_DATA_PREAMBLE: &str = "I was able to retrieve information from the APIs, but I'm having trouble processing it with AI right now. Here's the raw data I found:";

const ROLE: &str = "You are an intelligent assistant specializing in GRC (Governance, Risk, Compliance) and Service Management.\n\n\
You have access to real-time data from various APIs. When API results are available, analyze and incorporate them naturally into your response.";

const GUIDELINES: &str = "Guidelines:\n\
- Provide helpful, accurate, and contextual responses\n\
- Be conversational but professional\n\
- If API calls failed, acknowledge the limitation and provide general guidance\n\
- For GRC queries, focus on compliance, risk management, and governance\n\
- For Service queries, focus on operational status, performance, and monitoring\n\
- Always explain what the data means in business context\n\
- Suggest actionable next steps when appropriate";

/// Builds the system instruction. The data block is present only when there
/// are results to analyze.
pub fn build_system_prompt(api_results: &[ApiCallResult]) -> String {
    let mut prompt = String::from(ROLE);

    if !api_results.is_empty() {
        prompt.push_str("\n\nCurrent API Results:\n");
        prompt.push_str(&render_results(api_results));
        prompt.push_str(
            "\n\nPlease analyze this data and provide insights based on the user's question.",
        );
    }

    prompt.push_str("\n\n");
    prompt.push_str(GUIDELINES);
    prompt
}

/// Fallback when the model fails: raw data dump if any, apology otherwise.
pub fn fallback_response(api_results: &[ApiCallResult]) -> String {
    if api_results.is_empty() {
        APOLOGY_FALLBACK.to_string()
    } else {
        format!("{}\n\n{}", RAW_DATA_PREAMBLE, render_results(api_results))
    }
}
