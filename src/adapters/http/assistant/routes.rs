//! HTTP routes for the assistant endpoints.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::handlers::{chat, health, not_found, update_config, AssistantAppState};

/// Creates the assistant router with all routes.
///
/// Unmatched paths and unsupported methods on known paths both get the
/// JSON 404 body.
pub fn assistant_routes(state: AssistantAppState) -> Router {
    Router::new()
        // POST /chat
        .route("/chat", post(chat).fallback(not_found))
        // GET /health
        .route("/health", get(health).fallback(not_found))
        // POST /config
        .route("/config", post(update_config).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// CORS layer for the configured origin; `*` permits any origin.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        match server.cors_origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = %server.cors_origin, "Ignoring unparseable CORS origin");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Full application: routes plus CORS and request tracing.
pub fn build_app(state: AssistantAppState, server: &ServerConfig) -> Router {
    assistant_routes(state)
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::domain_api::MockDomainApiClient;
    use crate::application::{
        ApiOrchestrator, ChatHandler, CompletionGateway, ConfigUpdateError, IntegrationRegistry,
    };
    use crate::config::IntegrationsConfig;
    use crate::domain::assistant::{ApiDomain, KeywordIntentClassifier};
    use crate::ports::AIError;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(provider: MockAIProvider) -> Router {
        let assembler = move |_: &IntegrationsConfig| -> Result<ChatHandler, ConfigUpdateError> {
            Ok(ChatHandler::new(
                Arc::new(KeywordIntentClassifier::new()),
                ApiOrchestrator::new(
                    Arc::new(
                        MockDomainApiClient::new(ApiDomain::Grc)
                            .with_response("compliance-status", json!({ "score": 92 })),
                    ),
                    Arc::new(MockDomainApiClient::new(ApiDomain::Service)),
                ),
                CompletionGateway::new(Arc::new(provider.clone())),
            ))
        };
        let registry =
            IntegrationRegistry::new(IntegrationsConfig::default(), Arc::new(assembler)).unwrap();
        build_app(
            AssistantAppState::new(Arc::new(registry)),
            &ServerConfig::default(),
        )
    }

    fn app() -> Router {
        app_with(MockAIProvider::new().with_response("All good."))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn chat_returns_envelope() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/chat",
            Some(json!({ "message": "Show our compliance posture" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "All good.");
        assert_eq!(body["intents"], json!(["grc"]));
        assert_eq!(body["apiCalls"][0]["service"], "GRC");
        assert_eq!(body["apiCalls"][0]["endpoint"], "compliance-status");
        assert_eq!(body["apiCalls"][0]["status"], "Success");
        assert_eq!(body["apiCalls"][0]["data"], json!({ "score": 92 }));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn chat_rejects_missing_message() {
        let (status, body) = send(app(), Method::POST, "/chat", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid message");
        assert_eq!(body["message"], "Message is required and must be a string");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn chat_rejects_non_string_message() {
        let (status, body) =
            send(app(), Method::POST, "/chat", Some(json!({ "message": ["hi"] }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid message");
    }

    #[tokio::test]
    async fn chat_rejects_malformed_history() {
        let (status, body) = send(
            app(),
            Method::POST,
            "/chat",
            Some(json!({ "message": "hi", "conversationHistory": "nope" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn chat_reports_internal_failure() {
        let app = app_with(MockAIProvider::new().with_panic("boom"));

        let (status, body) =
            send(app, Method::POST, "/chat", Some(json!({ "message": "hello" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "boom");
    }

    #[tokio::test]
    async fn chat_falls_back_when_model_fails() {
        let app = app_with(MockAIProvider::new().with_error(AIError::unavailable("503")));

        let (status, body) =
            send(app, Method::POST, "/chat", Some(json!({ "message": "hello" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            crate::domain::assistant::APOLOGY_FALLBACK
        );
    }

    #[tokio::test]
    async fn health_reports_placeholders() {
        let (status, body) = send(app(), Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(
            body["services"],
            json!({
                "azure_ai": "Not Configured",
                "grc_api": "Not Configured",
                "service_api": "Not Configured"
            })
        );
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn config_update_is_visible_in_health() {
        let app = app();

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/config",
            Some(json!({ "service": "grc", "config": { "baseUrl": "https://grc.internal/api" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Configuration updated successfully");

        let (_, health) = send(app, Method::GET, "/health", None).await;
        assert_eq!(health["services"]["grc_api"], "Configured");
        assert_eq!(health["services"]["azure_ai"], "Not Configured");
    }

    #[tokio::test]
    async fn config_rejects_unknown_service_and_bad_patch() {
        for body in [
            json!({ "service": "billing", "config": {} }),
            json!({ "service": "grc" }),
            json!({ "service": "grc", "config": { "baseUrl": "nope" } }),
        ] {
            let (status, reply) = send(app(), Method::POST, "/config", Some(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(reply, json!({ "error": "Invalid service or config" }));
        }
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let (status, body) = send(app(), Method::GET, "/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
        assert_eq!(body["message"], "The requested endpoint does not exist");
    }

    #[tokio::test]
    async fn wrong_method_on_known_path_is_json_404() {
        for (method, uri) in [
            (Method::GET, "/chat"),
            (Method::POST, "/health"),
            (Method::GET, "/config"),
        ] {
            let (status, body) = send(app(), method, uri, None).await;

            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Not found");
        }
    }

    fn app_with_origin(origin: &str) -> Router {
        let assembler = |_: &IntegrationsConfig| -> Result<ChatHandler, ConfigUpdateError> {
            Ok(ChatHandler::new(
                Arc::new(KeywordIntentClassifier::new()),
                ApiOrchestrator::new(
                    Arc::new(MockDomainApiClient::new(ApiDomain::Grc)),
                    Arc::new(MockDomainApiClient::new(ApiDomain::Service)),
                ),
                CompletionGateway::new(Arc::new(MockAIProvider::new())),
            ))
        };
        let registry =
            IntegrationRegistry::new(IntegrationsConfig::default(), Arc::new(assembler)).unwrap();
        let server = ServerConfig {
            cors_origin: origin.to_string(),
            ..ServerConfig::default()
        };
        build_app(AssistantAppState::new(Arc::new(registry)), &server)
    }

    async fn preflight_allow_origin(app: Router) -> Option<String> {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/chat")
            .header(header::ORIGIN, "http://localhost:8080")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn preflight_allows_configured_origin() {
        let origin = ServerConfig::default().cors_origin;

        let allowed = preflight_allow_origin(app_with_origin(&origin)).await;

        assert_eq!(allowed.as_deref(), Some("http://localhost:8080"));
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_for_wildcard() {
        let allowed = preflight_allow_origin(app_with_origin("*")).await;

        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn preflight_allows_nothing_for_unparseable_origin() {
        let allowed = preflight_allow_origin(app_with_origin("http://bad\norigin")).await;

        assert_eq!(allowed, None);
    }
}
