//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AGENTIC_GATEWAY` prefix and nested values use double underscores as separators.
//!
//! Every integration starts from a placeholder default so the gateway boots
//! without credentials; `/health` reports which integrations are still unset.
//!
//! # Example
//!
//! ```no_run
//! use agentic_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod domain_api;
mod error;
mod patch;
mod server;

pub use ai::AzureConfig;
pub use domain_api::DomainApiConfig;
pub use error::{ConfigError, ValidationError};
pub use patch::{AzurePatch, ConfigPatch, DomainApiPatch, PatchError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, CORS, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Azure OpenAI configuration
    #[serde(default)]
    pub azure: AzureConfig,

    /// GRC API configuration
    pub grc: DomainApiConfig,

    /// Service-health API configuration
    pub service: DomainApiConfig,
}

/// The runtime-mutable part of the configuration.
///
/// This is what a [`ConfigPatch`] is applied to; server settings are fixed
/// for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationsConfig {
    pub azure: AzureConfig,
    pub grc: DomainApiConfig,
    pub service: DomainApiConfig,
}

impl IntegrationsConfig {
    /// Returns a copy with `patch` applied. The receiver is left untouched.
    pub fn patched(&self, patch: ConfigPatch) -> Self {
        let mut next = self.clone();
        match patch {
            ConfigPatch::Azure(p) => p.apply(&mut next.azure),
            ConfigPatch::Grc(p) => p.apply(&mut next.grc),
            ConfigPatch::Service(p) => p.apply(&mut next.service),
        }
        next
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.azure.validate()?;
        self.grc.validate("GRC__BASE_URL")?;
        self.service.validate("SERVICE__BASE_URL")?;
        Ok(())
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            azure: AzureConfig::default(),
            grc: DomainApiConfig::grc_default(),
            service: DomainApiConfig::service_default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds every integration with its placeholder defaults
    /// 3. Reads environment variables with `AGENTIC_GATEWAY` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AGENTIC_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AGENTIC_GATEWAY__GRC__BASE_URL=...` -> `grc.base_url = ...`
    /// - `AGENTIC_GATEWAY__AZURE__API_KEY=...` -> `azure.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let defaults = IntegrationsConfig::default();
        let mut builder = config::Config::builder()
            .set_default("azure.endpoint", defaults.azure.endpoint)?
            .set_default("azure.api_key", defaults.azure.api_key)?
            .set_default("azure.deployment_name", defaults.azure.deployment_name)?
            .set_default("azure.api_version", defaults.azure.api_version)?
            .set_default("azure.timeout_secs", defaults.azure.timeout_secs as i64)?;

        for (section, api) in [("grc", defaults.grc), ("service", defaults.service)] {
            builder = builder
                .set_default(format!("{section}.base_url"), api.base_url)?
                .set_default(format!("{section}.bearer_token"), api.bearer_token)?
                .set_default(format!("{section}.api_key"), api.api_key)?
                .set_default(format!("{section}.timeout_secs"), api.timeout_secs as i64)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("AGENTIC_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.integrations().validate()?;
        Ok(())
    }

    /// Snapshot of the runtime-mutable integration settings.
    pub fn integrations(&self) -> IntegrationsConfig {
        IntegrationsConfig {
            azure: self.azure.clone(),
            grc: self.grc.clone(),
            service: self.service.clone(),
        }
    }
}
