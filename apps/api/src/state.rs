use crate::config::Config;
use crate::ranking::engine::RankingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the pluggable pair scorer. Default: TF-IDF cosine.
    pub engine: RankingEngine,
}
