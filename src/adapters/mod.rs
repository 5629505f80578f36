//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Language-model providers (Azure OpenAI, mock)
//! - `domain_api` - GRC and service-health API clients (HTTP, mock)
//! - `http` - Axum routes exposing the chat pipeline
//! - `pipeline` - Wiring of the real adapters from configuration

pub mod ai;
pub mod domain_api;
pub mod http;
mod pipeline;

pub use pipeline::LivePipelineAssembler;
