//! CompletionGateway - turns conversation plus API results into one answer.
//!
//! Provider failures never escape: any `AIError` is logged and replaced by
//! the raw-data dump (when results exist) or the fixed apology.

use std::sync::Arc;

use crate::domain::assistant::{
    build_system_prompt, fallback_response, ApiCallResult, ConversationTurn, UserMessage,
};
use crate::ports::{AIProvider, CompletionRequest, Message, MessageRole};

/// Generation settings applied to every completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            top_p: 0.9,
            frequency_penalty: 0.3,
            presence_penalty: 0.3,
        }
    }
}

/// Language-model call with deterministic fallback.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
        }
    }

    /// Builds `[system, ...history, user]` with the fixed generation settings.
    pub fn build_request(
        &self,
        history: &[ConversationTurn],
        message: &UserMessage,
        api_results: &[ApiCallResult],
        trace_id: &str,
    ) -> CompletionRequest {
        let mut request = CompletionRequest::new(trace_id)
            .with_message(MessageRole::System, build_system_prompt(api_results))
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature)
            .with_top_p(self.settings.top_p)
            .with_penalties(
                self.settings.frequency_penalty,
                self.settings.presence_penalty,
            );
        request.messages.extend(history.iter().map(Message::from));
        request.with_message(MessageRole::User, message.as_str())
    }

    /// Returns the model's answer, or a fallback text if the provider fails.
    pub async fn complete(
        &self,
        history: &[ConversationTurn],
        message: &UserMessage,
        api_results: &[ApiCallResult],
        trace_id: &str,
    ) -> String {
        let request = self.build_request(history, message, api_results, trace_id);

        match self.provider.complete(request).await {
            Ok(response) => response.content,
            Err(err) => {
                tracing::warn!(
                    trace_id = %trace_id,
                    provider = %self.provider.provider_info().name,
                    api_results = api_results.len(),
                    "Completion failed, using fallback: {}",
                    err
                );
                fallback_response(api_results)
            }
        }
    }
}
