//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Language-model chat completion
//! - `DomainApiClient` - One read against the GRC or service-health API

mod ai_provider;
mod domain_api;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo,
};
pub use domain_api::{DomainApiClient, DomainApiError};
