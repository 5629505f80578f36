//! HTTP adapter for the assistant endpoints (`/chat`, `/health`, `/config`).

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ConfigUpdateRequest, ErrorResponse, HealthResponse,
    MessageResponse, ServicesStatus,
};
pub use handlers::{AssistantApiError, AssistantAppState};
pub use routes::{assistant_routes, build_app, cors_layer};
