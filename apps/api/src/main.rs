mod config;
mod errors;
mod extraction;
mod models;
mod ranking;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ranking::engine::RankingEngine;
use crate::ranking::normalizer::init_model;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Ranker v{}", env!("CARGO_PKG_VERSION"));

    // Load the keyword model before serving; a bad stopword file stops startup here
    init_model(config.stopwords_path.as_deref()).context("Failed to load keyword model")?;

    let engine = RankingEngine::default();
    info!("Ranking engine initialized (backend: {})", engine.backend());
    info!(
        "Limits: {} resumes per request, top_n 1..={} (default {})",
        config.max_resumes, config.max_top_n, config.default_top_n
    );

    let state = AppState {
        config: config.clone(),
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
