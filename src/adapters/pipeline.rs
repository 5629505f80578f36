//! Wires the real adapters into a chat pipeline.

use std::sync::Arc;

use crate::adapters::ai::{AzureOpenAIConfig, AzureOpenAIProvider};
use crate::adapters::domain_api::HttpDomainApiClient;
use crate::application::{
    ApiOrchestrator, ChatHandler, CompletionGateway, ConfigUpdateError, PipelineAssembler,
};
use crate::config::IntegrationsConfig;
use crate::domain::assistant::{ApiDomain, IntentClassifier, KeywordIntentClassifier};

/// Assembles Azure OpenAI and HTTP domain clients from configuration.
pub struct LivePipelineAssembler {
    classifier: Arc<dyn IntentClassifier>,
}

impl LivePipelineAssembler {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(KeywordIntentClassifier::new()),
        }
    }
}

impl Default for LivePipelineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineAssembler for LivePipelineAssembler {
    fn assemble(&self, config: &IntegrationsConfig) -> Result<ChatHandler, ConfigUpdateError> {
        let assembly = |e: &dyn std::fmt::Display| ConfigUpdateError::Assembly(e.to_string());

        let provider = AzureOpenAIProvider::new(AzureOpenAIConfig::from(&config.azure))
            .map_err(|e| assembly(&e))?;
        let grc = HttpDomainApiClient::new(ApiDomain::Grc, &config.grc).map_err(|e| assembly(&e))?;
        let service = HttpDomainApiClient::new(ApiDomain::Service, &config.service)
            .map_err(|e| assembly(&e))?;

        Ok(ChatHandler::new(
            self.classifier.clone(),
            ApiOrchestrator::new(Arc::new(grc), Arc::new(service)),
            CompletionGateway::new(Arc::new(provider)),
        ))
    }
}
