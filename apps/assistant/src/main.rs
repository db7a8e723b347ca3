mod bootstrap;
mod config;
mod errors;
mod interview;
mod llm_client;
mod retrieval;
mod routes;
mod sessions;
mod state;
mod web;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::llm_client::{BedrockEmbeddings, BedrockLlm};
use crate::routes::build_router;
use crate::sessions::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hiring Assistant v{}", env!("CARGO_PKG_VERSION"));

    let state = match build_state(config.clone()).await {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e:#}");
            return Err(e);
        }
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds every long-lived handle. Fails fast: no retry, no fallback model.
async fn build_state(config: Config) -> Result<AppState> {
    // AWS credentials (Secrets Manager, env, or default chain) → Bedrock runtime client
    let sdk_config = bootstrap::load_sdk_config(&config).await?;
    let bedrock = aws_sdk_bedrockruntime::Client::new(&sdk_config);

    let llm = BedrockLlm::new(
        bedrock.clone(),
        config.model_id.clone(),
        config.llm_max_tokens,
        config.llm_temperature,
    );
    info!("LLM client initialized (model: {})", config.model_id);

    let embedder = BedrockEmbeddings::new(bedrock, config.embedding_model_id.clone());
    info!(
        "Embeddings client initialized (model: {})",
        config.embedding_model_id
    );

    let vector_store = bootstrap::open_vector_store(&config)?;
    info!(
        "Vector store ready: {} ({} documents)",
        vector_store.path().display(),
        vector_store.len()
    );

    let ttl = Duration::from_secs(config.session_ttl_secs);
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            Arc::new(RedisSessionStore::new(client, config.session_ttl_secs))
        }
        None => Arc::new(MemorySessionStore::new(ttl)),
    };
    info!(
        "Session store: {} (ttl {}s)",
        sessions.backend(),
        config.session_ttl_secs
    );

    Ok(AppState {
        config,
        llm: Arc::new(llm),
        embedder: Arc::new(embedder),
        vector_store: Arc::new(vector_store),
        sessions,
    })
}
