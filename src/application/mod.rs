//! Application layer - the chat pipeline and its runtime configuration.
//!
//! - `ApiOrchestrator` routes intents to domain API clients
//! - `CompletionGateway` calls the model with deterministic fallback
//! - `handlers::ChatHandler` is the single entry point per chat message
//! - `IntegrationRegistry` publishes configuration snapshots

mod completion_gateway;
pub mod handlers;
mod integrations;
mod orchestrator;

pub use completion_gateway::{CompletionGateway, GenerationSettings};
pub use handlers::{ChatCommand, ChatError, ChatHandler, ChatResult};
pub use integrations::{
    ConfigUpdateError, IntegrationRegistry, IntegrationSnapshot, IntegrationStatus,
    PipelineAssembler,
};
pub use orchestrator::ApiOrchestrator;
