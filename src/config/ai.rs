//! Language-model provider configuration (Azure OpenAI)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

pub(super) const PLACEHOLDER_ENDPOINT: &str = "https://your-resource.openai.azure.com/";
pub(super) const PLACEHOLDER_API_KEY: &str = "your-azure-openai-api-key";

/// Azure OpenAI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AzureConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com/`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent in the `api-key` header
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Deployment (model) name
    #[serde(default = "default_deployment_name")]
    pub deployment_name: String,

    /// REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AzureConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True once the API key has been changed from its placeholder
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// Validate Azure configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.endpoint) {
            return Err(ValidationError::InvalidUrl("AZURE__ENDPOINT"));
        }
        if self.deployment_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AZURE__DEPLOYMENT_NAME"));
        }
        if self.api_version.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AZURE__API_VERSION"));
        }
        if !(1..=300).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout("AZURE__TIMEOUT_SECS"));
        }
        Ok(())
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            deployment_name: default_deployment_name(),
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub(super) fn default_endpoint() -> String {
    PLACEHOLDER_ENDPOINT.to_string()
}

pub(super) fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

pub(super) fn default_deployment_name() -> String {
    "gpt-4".to_string()
}

pub(super) fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

pub(super) fn default_timeout() -> u64 {
    30
}
