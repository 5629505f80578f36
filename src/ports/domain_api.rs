//! Domain API Port - Interface for the GRC and service-health data sources.
//!
//! Adapters implement `fetch`, which performs one outbound read and reports
//! transport failures as `DomainApiError`. Callers use `invoke`, which never
//! fails: errors are folded into an `Error`-status `ApiCallResult` so that
//! one unreachable API cannot abort the rest of a chat request.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::assistant::{ApiCallResult, ApiDomain, DomainEndpointCall};

/// Port for one external domain API.
#[async_trait]
pub trait DomainApiClient: Send + Sync {
    /// The domain this client serves.
    fn domain(&self) -> ApiDomain;

    /// Perform the read and return the response body.
    ///
    /// Only called by `invoke` with calls for this client's domain.
    async fn fetch(&self, call: &DomainEndpointCall) -> Result<Value, DomainApiError>;

    /// Perform the call and wrap the outcome, success or failure, in an envelope.
    async fn invoke(&self, call: &DomainEndpointCall) -> ApiCallResult {
        tracing::debug!(
            service = call.domain.service_name(),
            endpoint = %call.endpoint_name,
            "Calling domain API"
        );

        let outcome = if call.domain == self.domain() {
            self.fetch(call).await
        } else {
            Err(DomainApiError::WrongDomain {
                call: call.domain,
                client: self.domain(),
            })
        };

        match outcome {
            Ok(data) => ApiCallResult::success(call.domain, call.endpoint_name.clone(), data),
            Err(err) => {
                tracing::warn!(
                    service = call.domain.service_name(),
                    endpoint = %call.endpoint_name,
                    "Domain API error: {}",
                    err
                );
                ApiCallResult::failure(call.domain, call.endpoint_name.clone(), err.to_string())
            }
        }
    }
}

/// Domain API transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainApiError {
    /// Request timed out.
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout { timeout_ms: u64 },

    /// Connection or other transport failure.
    #[error("{0}")]
    Network(String),

    /// Non-2xx response.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// Call was routed to a client serving another domain.
    #[error("{call} call routed to the {client} client")]
    WrongDomain { call: ApiDomain, client: ApiDomain },

    /// Client could not be constructed or the request could not be built.
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl DomainApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
