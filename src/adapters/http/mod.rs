//! HTTP adapters - REST API implementations.

pub mod assistant;

// Re-export key types for convenience
pub use assistant::{assistant_routes, build_app, AssistantAppState};
