//! IntegrationRegistry - immutable configuration snapshots with a single writer.
//!
//! Readers clone the current `Arc<IntegrationSnapshot>` and keep it for the
//! whole request. An update clones the configuration, applies the patch,
//! validates it, assembles a fresh pipeline and only then publishes it.

use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::application::handlers::ChatHandler;
use crate::config::{ConfigPatch, IntegrationsConfig, PatchError, ValidationError};

/// Why a configuration update was refused. The active snapshot is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigUpdateError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to assemble integrations: {0}")]
    Assembly(String),
}

/// Builds a chat pipeline from integration settings.
pub trait PipelineAssembler: Send + Sync {
    fn assemble(&self, config: &IntegrationsConfig) -> Result<ChatHandler, ConfigUpdateError>;
}

impl<F> PipelineAssembler for F
where
    F: Fn(&IntegrationsConfig) -> Result<ChatHandler, ConfigUpdateError> + Send + Sync,
{
    fn assemble(&self, config: &IntegrationsConfig) -> Result<ChatHandler, ConfigUpdateError> {
        self(config)
    }
}

/// Per-integration configured flags, as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationStatus {
    pub azure_ai: bool,
    pub grc_api: bool,
    pub service_api: bool,
}

/// One published configuration and the pipeline assembled from it.
pub struct IntegrationSnapshot {
    config: IntegrationsConfig,
    chat: ChatHandler,
}

impl IntegrationSnapshot {
    pub fn config(&self) -> &IntegrationsConfig {
        &self.config
    }

    pub fn chat_handler(&self) -> &ChatHandler {
        &self.chat
    }

    pub fn status(&self) -> IntegrationStatus {
        IntegrationStatus {
            azure_ai: self.config.azure.is_configured(),
            grc_api: self.config.grc.is_configured(),
            service_api: self.config.service.is_configured(),
        }
    }
}

/// Holds the current snapshot and serializes updates.
pub struct IntegrationRegistry {
    current: RwLock<Arc<IntegrationSnapshot>>,
    writer: Mutex<()>,
    assembler: Arc<dyn PipelineAssembler>,
}

impl IntegrationRegistry {
    /// Validates and assembles the initial snapshot.
    pub fn new(
        config: IntegrationsConfig,
        assembler: Arc<dyn PipelineAssembler>,
    ) -> Result<Self, ConfigUpdateError> {
        let snapshot = Self::build(&*assembler, config)?;
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            writer: Mutex::new(()),
            assembler,
        })
    }

    fn build(
        assembler: &dyn PipelineAssembler,
        config: IntegrationsConfig,
    ) -> Result<IntegrationSnapshot, ConfigUpdateError> {
        config.validate()?;
        let chat = assembler.assemble(&config)?;
        Ok(IntegrationSnapshot { config, chat })
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> Arc<IntegrationSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Applies `patch` on top of the current configuration and publishes the result.
    pub async fn update(&self, patch: ConfigPatch) -> Result<(), ConfigUpdateError> {
        let _writer = self.writer.lock().await;

        let target = patch.target();
        let next = self.current().config.patched(patch);
        let snapshot = Self::build(&*self.assembler, next).map_err(|err| {
            tracing::warn!(service = target, "Rejected configuration update: {}", err);
            err
        })?;

        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(snapshot);

        tracing::info!(service = target, "Configuration updated");
        Ok(())
    }
}
