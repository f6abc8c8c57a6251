mod admin;
mod config;
mod db;
mod enhancement;
mod errors;
mod feedback;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::enhancement::orchestrator::EnhancementOrchestrator;
use crate::enhancement::sinks::{PgAnalyticsSink, PgPromptStore};
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PromptShift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize completion client (ConfigError if the API key is absent)
    let client = GroqClient::new(&config.completion_settings())?;
    info!("Completion client initialized ({})", config.groq_base_url);

    // Initialize the enhancement pipeline
    let enhancer = EnhancementOrchestrator::new(
        config.retry_policy(),
        Arc::new(client),
        Arc::new(PgPromptStore::new(db.clone())),
        Arc::new(PgAnalyticsSink::new(db.clone())),
    )?;
    info!(
        "Enhancement orchestrator ready: candidates={:?}, max_attempts={}",
        enhancer.policy().candidates,
        enhancer.policy().max_attempts
    );

    // Build app state
    let state = AppState {
        db,
        enhancer: Arc::new(enhancer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
