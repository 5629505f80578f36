//! ApiOrchestrator - routes classified intents to the domain API clients.
//!
//! Each non-general intent yields exactly one `ApiCallResult`. Calls run
//! concurrently; results come back in intent order.

use futures::future::join_all;
use std::sync::Arc;

use crate::domain::assistant::{ApiCallResult, ApiDomain, Intent};
use crate::ports::DomainApiClient;

/// Selects a sub-endpoint per intent and invokes the matching client.
#[derive(Clone)]
pub struct ApiOrchestrator {
    grc: Arc<dyn DomainApiClient>,
    service: Arc<dyn DomainApiClient>,
}

impl ApiOrchestrator {
    pub fn new(grc: Arc<dyn DomainApiClient>, service: Arc<dyn DomainApiClient>) -> Self {
        Self { grc, service }
    }

    fn client_for(&self, domain: ApiDomain) -> &dyn DomainApiClient {
        match domain {
            ApiDomain::Grc => self.grc.as_ref(),
            ApiDomain::Service => self.service.as_ref(),
        }
    }

    /// Performs select then invoke for every domain intent.
    ///
    /// Never fails: a failing API occupies its slot as an `Error` result.
    pub async fn route(&self, intents: &[Intent], message: &str) -> Vec<ApiCallResult> {
        let calls = intents.iter().filter_map(|intent| {
            let domain = intent.domain()?;
            let call = domain.selector().select(message);
            tracing::debug!(
                service = domain.service_name(),
                endpoint = %call.endpoint_name,
                "Selected endpoint"
            );
            Some((domain, call))
        });

        join_all(
            calls.map(|(domain, call)| async move { self.client_for(domain).invoke(&call).await }),
        )
        .await
    }
}
