mod config;
mod errors;
mod llm_client;
mod models;
mod planning;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::BedrockTextModel;
use crate::planning::generator::{PlanGenerator, MODEL_TIMEOUT};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Planner API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model backend once for the whole process
    let model = BedrockTextModel::from_config(&config).await;
    info!(
        "Bedrock client initialized (model: {}, region: {}, max_attempts: {})",
        llm_client::MODEL_ID,
        config.bedrock_region,
        config.bedrock_max_attempts
    );

    let generator = PlanGenerator::new(Arc::new(model));
    info!("Plan generator ready (timeout: {}s)", MODEL_TIMEOUT.as_secs());

    // Build app state
    let state = AppState {
        generator: Arc::new(generator),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
