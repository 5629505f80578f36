use std::sync::Arc;

use axum::serve;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use agentic_gateway::adapters::http::{build_app, AssistantAppState};
use agentic_gateway::adapters::LivePipelineAssembler;
use agentic_gateway::application::IntegrationRegistry;
use agentic_gateway::config::AppConfig;

fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "not configured (placeholder)"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(config.server.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.server.log_json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    config.validate()?;

    let registry = Arc::new(IntegrationRegistry::new(
        config.integrations(),
        Arc::new(LivePipelineAssembler::new()),
    )?);

    let status = registry.current().status();
    info!("Azure OpenAI: {}", configured(status.azure_ai));
    info!("GRC API: {}", configured(status.grc_api));
    info!("Service API: {}", configured(status.service_api));

    let app = build_app(AssistantAppState::new(registry), &config.server);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Agentic gateway listening on http://{}", addr);
    info!("  POST /chat   - Main chat endpoint");
    info!("  GET  /health - Health check");
    info!("  POST /config - Update configuration");
    serve(listener, app).await?;

    Ok(())
}
