//! HTTP handlers for the assistant endpoints.
//!
//! These handlers connect Axum routes to the chat pipeline and the
//! integration registry.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{ChatCommand, ChatError, ConfigUpdateError, IntegrationRegistry};
use crate::config::ConfigPatch;

use super::dto::{
    ChatRequest, ChatResponse, ConfigUpdateRequest, ErrorResponse, HealthResponse,
    MessageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Assistant API error that implements IntoResponse.
#[derive(Debug)]
pub enum AssistantApiError {
    InvalidMessage,
    InvalidBody(String),
    InvalidConfig,
    Internal(String),
}

impl IntoResponse for AssistantApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AssistantApiError::InvalidMessage => {
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_message())
            }
            AssistantApiError::InvalidBody(reason) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_body(reason))
            }
            AssistantApiError::InvalidConfig => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid service or config"),
            ),
            AssistantApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal(message),
            ),
        };
        (status, Json(error)).into_response()
    }
}

impl From<ChatError> for AssistantApiError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::InvalidInput(_) => AssistantApiError::InvalidMessage,
            ChatError::Internal(message) => AssistantApiError::Internal(message),
        }
    }
}

impl From<ConfigUpdateError> for AssistantApiError {
    fn from(_: ConfigUpdateError) -> Self {
        AssistantApiError::InvalidConfig
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the assistant routes.
#[derive(Clone)]
pub struct AssistantAppState {
    pub registry: Arc<IntegrationRegistry>,
}

impl AssistantAppState {
    pub fn new(registry: Arc<IntegrationRegistry>) -> Self {
        Self { registry }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat - Answer one chat message
pub async fn chat(
    State(state): State<AssistantAppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AssistantApiError> {
    let Json(req) = body.map_err(|rejection| AssistantApiError::InvalidBody(rejection.body_text()))?;

    let cmd = ChatCommand {
        message: req.message,
        conversation_history: req.conversation_history,
    };

    // The snapshot is held for the whole request; config updates do not affect it.
    let snapshot = state.registry.current();
    let result = snapshot.chat_handler().handle(cmd).await?;

    Ok(Json(result.into()))
}

/// GET /health - Process status and per-integration configuration
pub async fn health(State(state): State<AssistantAppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.registry.current().status()))
}

/// POST /config - Merge field overrides into one integration
pub async fn update_config(
    State(state): State<AssistantAppState>,
    body: Result<Json<ConfigUpdateRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AssistantApiError> {
    let Json(req) = body.map_err(|_| AssistantApiError::InvalidConfig)?;

    let (Some(service), Some(config)) = (req.service, req.config) else {
        return Err(AssistantApiError::InvalidConfig);
    };
    let patch = ConfigPatch::parse(&service, config).map_err(ConfigUpdateError::from)?;

    state.registry.update(patch).await?;

    Ok(Json(MessageResponse {
        message: "Configuration updated successfully".to_string(),
    }))
}

/// Fallback for unknown paths
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}
