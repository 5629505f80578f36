//! HTTP Domain API Client - reqwest implementation of DomainApiClient.
//!
//! Issues `GET {base_url}/{endpoint}` with the static header set
//! (`Authorization: Bearer`, `X-API-Key`, JSON content type, plus any
//! configured extras). Non-2xx responses are failures. A 2xx body is
//! returned as JSON when it parses, otherwise as a JSON string.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::config::DomainApiConfig;
use crate::domain::assistant::{ApiDomain, DomainEndpointCall};
use crate::ports::{DomainApiClient, DomainApiError};

/// Domain API client over HTTP.
pub struct HttpDomainApiClient {
    domain: ApiDomain,
    base_url: String,
    bearer_token: Secret<String>,
    api_key: Secret<String>,
    timeout: Duration,
    client: Client,
}

impl HttpDomainApiClient {
    /// Creates a client for `domain` from its configuration.
    ///
    /// Extra headers are validated here so a bad name surfaces at
    /// assembly time rather than on the first request.
    pub fn new(domain: ApiDomain, config: &DomainApiConfig) -> Result<Self, DomainApiError> {
        let mut extra = HeaderMap::new();
        extra.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &config.headers {
            let bad_header = |e: &dyn std::fmt::Display| {
                DomainApiError::Configuration(format!("header {}: {}", key, e))
            };
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| bad_header(&e))?;
            let value = HeaderValue::from_str(value).map_err(|e| bad_header(&e))?;
            extra.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(extra)
            .build()
            .map_err(|e| DomainApiError::Configuration(e.to_string()))?;

        Ok(Self {
            domain,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: Secret::new(config.bearer_token.clone()),
            api_key: Secret::new(config.api_key.clone()),
            timeout: config.timeout(),
            client,
        })
    }

    fn endpoint_url(&self, endpoint_name: &str) -> String {
        format!("{}/{}", self.base_url, endpoint_name.trim_start_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> DomainApiError {
        if err.is_timeout() {
            DomainApiError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if let Some(status) = err.status() {
            DomainApiError::Status {
                status: status.as_u16(),
            }
        } else if err.is_connect() {
            DomainApiError::network(format!("Connection failed: {}", err))
        } else {
            DomainApiError::network(err.to_string())
        }
    }
}

#[async_trait]
impl DomainApiClient for HttpDomainApiClient {
    fn domain(&self) -> ApiDomain {
        self.domain
    }

    async fn fetch(&self, call: &DomainEndpointCall) -> Result<Value, DomainApiError> {
        let mut request = self
            .client
            .get(self.endpoint_url(&call.endpoint_name))
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.bearer_token.expose_secret()),
            )
            .header("X-API-Key", self.api_key.expose_secret().as_str());
        if !call.parameters.is_empty() {
            request = request.query(&call.parameters);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.map_transport_error(e))?;

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
