//! Tickerscope - technical indicators, signal aggregation and stock ranking

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::RankingEngine;
use sources::MarketDataSource;
use std::sync::Arc;

pub use error::{AppError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn MarketDataSource>,
    pub ranking: Arc<RankingEngine>,
}

impl AppState {
    /// Wire the ranking engine to a data source using the configured settings.
    pub fn new(config: Config, source: Arc<dyn MarketDataSource>) -> Self {
        let ranking = Arc::new(RankingEngine::new(source.clone(), config.ranking.clone()));
        Self {
            config: Arc::new(config),
            source,
            ranking,
        }
    }
}
