//! Result envelope for a single domain API call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;

use super::endpoint::ApiDomain;

/// Outcome of a domain API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiCallStatus {
    Success,
    Error,
}

/// Uniform envelope produced exactly once per attempted domain call.
///
/// On success `data` is the response body; on failure it is a string
/// describing what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallResult {
    pub service: String,
    pub endpoint: String,
    pub status: ApiCallStatus,
    pub data: Value,
    pub timestamp: Timestamp,
}

impl ApiCallResult {
    pub fn success(domain: ApiDomain, endpoint: impl Into<String>, data: Value) -> Self {
        Self {
            service: domain.service_name().to_string(),
            endpoint: endpoint.into(),
            status: ApiCallStatus::Success,
            data,
            timestamp: Timestamp::now(),
        }
    }

    /// Error envelope; `data` reads `Failed to fetch <label> data: <reason>`.
    pub fn failure(domain: ApiDomain, endpoint: impl Into<String>, reason: impl AsRef<str>) -> Self {
        Self {
            service: domain.service_name().to_string(),
            endpoint: endpoint.into(),
            status: ApiCallStatus::Error,
            data: Value::String(format!(
                "Failed to fetch {} data: {}",
                domain.data_label(),
                reason.as_ref()
            )),
            timestamp: Timestamp::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ApiCallStatus::Success
    }
}

/// Pretty-printed JSON of a result list, as embedded in prompts and fallbacks.
pub fn render_results(results: &[ApiCallResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| format!("{:?}", results))
}
