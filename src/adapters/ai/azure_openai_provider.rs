//! Azure OpenAI Provider - Implementation of AIProvider for Azure-hosted chat deployments.
//!
//! Requests go to
//! `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
//! and authenticate with the `api-key` header. There are no retries: a failed
//! completion is reported once and the caller decides how to degrade.
//!
//! # Configuration
//!
//! ```ignore
//! let provider = AzureOpenAIProvider::new(
//!     AzureOpenAIConfig::new("https://my-resource.openai.azure.com/", api_key)
//!         .with_deployment("gpt-4"),
//! )?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AzureConfig;
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Configuration for the Azure OpenAI provider.
#[derive(Debug, Clone)]
pub struct AzureOpenAIConfig {
    /// Resource endpoint; a trailing slash is tolerated.
    pub endpoint: String,
    /// API key for authentication.
    api_key: Secret<String>,
    /// Deployment name (the model alias on the resource).
    pub deployment: String,
    /// REST API version query parameter.
    pub api_version: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AzureOpenAIConfig {
    /// Creates a new configuration with the given endpoint and API key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: Secret::new(api_key.into()),
            deployment: "gpt-4".to_string(),
            api_version: "2024-02-15-preview".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the deployment name.
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Sets the API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&AzureConfig> for AzureOpenAIConfig {
    fn from(config: &AzureConfig) -> Self {
        Self::new(config.endpoint.clone(), config.api_key.clone())
            .with_deployment(config.deployment_name.clone())
            .with_api_version(config.api_version.clone())
            .with_timeout(config.timeout())
    }
}

/// Azure OpenAI provider implementation.
pub struct AzureOpenAIProvider {
    config: AzureOpenAIConfig,
    client: Client,
}

impl AzureOpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: AzureOpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment
        )
    }

    /// Converts our request to the chat completions wire format.
    fn to_azure_request(request: &CompletionRequest) -> AzureRequest<'_> {
        AzureRequest {
            messages: request
                .messages
                .iter()
                .map(|msg| AzureMessage {
                    role: msg.role.as_str(),
                    content: &msg.content,
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        }
    }

    /// Sends a request and handles transport failures.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&Self::to_azure_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Azure phrases throttling as "retry after N seconds".
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string));

        message
            .as_deref()
            .and_then(|s| s.split("retry after ").nth(1))
            .and_then(|rest| {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .unwrap_or(30)
    }

    /// Parses a non-streaming response.
    async fn parse_response(response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let azure_response: AzureResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = azure_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let content = choice
            .message
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AIError::parse("Empty completion content"))?;

        Ok(CompletionResponse {
            content,
            model: azure_response.model.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl AIProvider for AzureOpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(
            trace_id = %request.trace_id,
            deployment = %self.config.deployment,
            messages = request.messages.len(),
            "Sending chat completion request"
        );
        let response = self.send_request(&request).await?;
        Self::parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("azure-openai", self.config.deployment.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Azure OpenAI API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct AzureRequest<'a> {
    messages: Vec<AzureMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AzureMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    #[serde(default)]
    choices: Vec<AzureChoice>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
}

#[derive(Debug, Deserialize)]
struct AzureResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        api_key: Arc<Mutex<Option<String>>>,
        api_version: Arc<Mutex<Option<String>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    /// Serves a fixed status and body on the deployment path of a local port.
    async fn spawn_azure(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/openai/deployments/gpt-4/chat/completions",
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Query(query): Query<HashMap<String, String>>,
                          Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            *captured.api_key.lock().unwrap() = headers
                                .get("api-key")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string);
                            *captured.api_version.lock().unwrap() =
                                query.get("api-version").cloned();
                            *captured.body.lock().unwrap() = Some(body);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", addr), captured)
    }

    fn provider(endpoint: &str) -> AzureOpenAIProvider {
        AzureOpenAIProvider::new(
            AzureOpenAIConfig::new(endpoint, "secret-key").with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("trace-1")
            .with_message(MessageRole::System, "You are helpful")
            .with_message(MessageRole::User, "Hello")
            .with_max_tokens(1000)
            .with_temperature(0.7)
            .with_top_p(0.9)
            .with_penalties(0.3, 0.3)
    }

    #[test]
    fn config_from_app_config() {
        let app_config = AzureConfig {
            endpoint: "https://res.openai.azure.com/".to_string(),
            api_key: "k".to_string(),
            deployment_name: "gpt-4o".to_string(),
            api_version: "2024-06-01".to_string(),
            timeout_secs: 12,
        };
        let config = AzureOpenAIConfig::from(&app_config);

        assert_eq!(config.deployment, "gpt-4o");
        assert_eq!(config.api_version, "2024-06-01");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.api_key(), "k");
    }

    #[test]
    fn completions_url_trims_trailing_slash() {
        let provider = provider("https://res.openai.azure.com/");
        assert_eq!(
            provider.completions_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4/chat/completions"
        );
    }

    #[test]
    fn retry_after_is_parsed_from_message() {
        let body = r#"{"error":{"message":"Rate limit exceeded. Please retry after 12 seconds."}}"#;
        assert_eq!(AzureOpenAIProvider::parse_retry_after(body), 12);
        assert_eq!(AzureOpenAIProvider::parse_retry_after("not json"), 30);
    }

    #[test]
    fn provider_info_reports_deployment() {
        let info = provider("https://res.openai.azure.com").provider_info();
        assert_eq!(info, ProviderInfo::new("azure-openai", "gpt-4"));
    }

    #[tokio::test]
    async fn complete_sends_wire_format_and_returns_content() {
        let (endpoint, captured) = spawn_azure(
            StatusCode::OK,
            json!({
                "model": "gpt-4",
                "choices": [{ "message": { "role": "assistant", "content": "Hi there" } }]
            }),
        )
        .await;

        let response = provider(&endpoint).complete(request()).await.unwrap();

        assert_eq!(response.content, "Hi there");
        assert_eq!(response.model, "gpt-4");
        assert_eq!(captured.api_key.lock().unwrap().as_deref(), Some("secret-key"));
        assert_eq!(
            captured.api_version.lock().unwrap().as_deref(),
            Some("2024-02-15-preview")
        );

        let body = captured.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert_eq!(body["max_tokens"], 1000);
        assert!(body.get("model").is_none());
    }

    #[tokio::test]
    async fn null_content_is_parse_error() {
        let (endpoint, _) = spawn_azure(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "content": null } }] }),
        )
        .await;

        let err = provider(&endpoint).complete(request()).await.unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_choices_is_parse_error() {
        let (endpoint, _) = spawn_azure(StatusCode::OK, json!({ "choices": [] })).await;

        let err = provider(&endpoint).complete(request()).await.unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let cases = [
            (StatusCode::UNAUTHORIZED, "auth"),
            (StatusCode::TOO_MANY_REQUESTS, "rate"),
            (StatusCode::BAD_REQUEST, "invalid"),
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        ];

        for (status, expected) in cases {
            let (endpoint, _) = spawn_azure(status, json!({ "error": { "message": "x" } })).await;
            let err = provider(&endpoint).complete(request()).await.unwrap_err();

            let matched = match expected {
                "auth" => matches!(err, AIError::AuthenticationFailed),
                "rate" => matches!(err, AIError::RateLimited { retry_after_secs: 30 }),
                "invalid" => matches!(err, AIError::InvalidRequest(_)),
                _ => matches!(err, AIError::Unavailable { .. }),
            };
            assert!(matched, "{} mapped to {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(&format!("http://{}", addr))
            .complete(request())
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Network(_)));
    }
}
