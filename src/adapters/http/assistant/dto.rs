//! HTTP DTOs for the assistant endpoints.
//!
//! Field names follow the browser client's camelCase contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{ChatResult, IntegrationStatus};
use crate::domain::assistant::{ApiCallResult, ConversationHistory, Intent};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// Left untyped so a non-string value can be reported as an invalid message.
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: ConversationHistory,
}

/// Body of `POST /config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdateRequest {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub config: Option<Value>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Envelope returned by `POST /chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub api_calls: Vec<ApiCallResult>,
    pub intents: Vec<Intent>,
    pub timestamp: Timestamp,
}

impl From<ChatResult> for ChatResponse {
    fn from(result: ChatResult) -> Self {
        Self {
            response: result.response,
            api_calls: result.api_calls,
            intents: result.intents,
            timestamp: result.timestamp,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub services: ServicesStatus,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesStatus {
    pub azure_ai: &'static str,
    pub grc_api: &'static str,
    pub service_api: &'static str,
}

fn configured_label(configured: bool) -> &'static str {
    if configured {
        "Configured"
    } else {
        "Not Configured"
    }
}

impl From<IntegrationStatus> for ServicesStatus {
    fn from(status: IntegrationStatus) -> Self {
        Self {
            azure_ai: configured_label(status.azure_ai),
            grc_api: configured_label(status.grc_api),
            service_api: configured_label(status.service_api),
        }
    }
}

impl HealthResponse {
    pub fn ok(status: IntegrationStatus) -> Self {
        Self {
            status: "OK",
            timestamp: Timestamp::now(),
            services: status.into(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Body of a successful `POST /config`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body shared by all endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            timestamp: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn timestamped(mut self) -> Self {
        self.timestamp = Some(Timestamp::now());
        self
    }

    pub fn invalid_message() -> Self {
        Self::new("Invalid message")
            .with_message("Message is required and must be a string")
            .timestamped()
    }

    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::new("Invalid request body")
            .with_message(reason)
            .timestamped()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("Internal server error")
            .with_message(message)
            .timestamped()
    }

    pub fn not_found() -> Self {
        Self::new("Not found").with_message("The requested endpoint does not exist")
    }
}
