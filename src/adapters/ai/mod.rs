//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `AzureOpenAIProvider` - Azure-hosted OpenAI chat deployments

mod azure_openai_provider;
mod mock_provider;

pub use azure_openai_provider::{AzureOpenAIConfig, AzureOpenAIProvider};
pub use mock_provider::{MockAIProvider, MockResponse};
