//! Upstream market-data collaborators.
//!
//! The computation layer only sees the [`MarketDataSource`] trait; the
//! concrete clients here talk to Yahoo Finance (price history), Finnhub
//! (aggregate technicals) and Alpha Vantage (news sentiment).

pub mod alphavantage;
pub mod finnhub;
pub mod hub;
pub mod yahoo;

pub use alphavantage::AlphaVantageClient;
pub use finnhub::FinnhubClient;
pub use hub::ProviderHub;
pub use yahoo::YahooFinanceClient;

use crate::types::{HistoryRange, PriceSeries, TechnicalReport};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Failure talking to an upstream provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no data for {0}")]
    NoData(String),

    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Parse(e.to_string())
        } else {
            SourceError::Request(e.to_string())
        }
    }
}

/// Boxed future returned by [`MarketDataSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Everything the ranking and signal layers need from the outside world.
pub trait MarketDataSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Daily history for a symbol.
    fn price_history<'a>(&'a self, symbol: &'a str, range: HistoryRange) -> SourceFuture<'a, PriceSeries>;

    /// Recent percentage price move.
    fn price_change_pct<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, f64>;

    /// Technical-analysis payload (summary counts and/or indicator rows).
    fn technical_report<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, TechnicalReport>;

    /// Per-headline sentiment scores in `[-1, 1]`.
    fn sentiment_scores<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<f64>>;
}
