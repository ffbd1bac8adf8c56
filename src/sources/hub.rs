//! Routes each kind of market data to the provider that serves it.

use super::{AlphaVantageClient, FinnhubClient, MarketDataSource, SourceError, SourceFuture, YahooFinanceClient};
use crate::config::Config;
use crate::types::{HistoryRange, PriceSeries, TechnicalReport};
use tracing::{debug, info};

/// Default number of sessions for the recent price move.
pub const DEFAULT_LOOKBACK_DAYS: usize = 5;

/// Concrete [`MarketDataSource`] backed by the public providers.
pub struct ProviderHub {
    yahoo: YahooFinanceClient,
    finnhub: Option<FinnhubClient>,
    alphavantage: Option<AlphaVantageClient>,
    lookback_days: usize,
}

impl ProviderHub {
    pub fn new(
        yahoo: YahooFinanceClient,
        finnhub: Option<FinnhubClient>,
        alphavantage: Option<AlphaVantageClient>,
        lookback_days: usize,
    ) -> Self {
        Self {
            yahoo,
            finnhub,
            alphavantage,
            lookback_days: lookback_days.max(1),
        }
    }

    /// Build clients for every provider that has credentials configured.
    pub fn from_config(config: &Config) -> Self {
        let finnhub = config.finnhub_api_key.clone().map(FinnhubClient::new);
        let alphavantage = config.alpha_vantage_api_key.clone().map(AlphaVantageClient::new);

        info!(
            "Provider hub: yahoo=on finnhub={} alphavantage={}",
            if finnhub.is_some() { "on" } else { "off" },
            if alphavantage.is_some() { "on" } else { "off" },
        );

        Self::new(
            YahooFinanceClient::new(),
            finnhub,
            alphavantage,
            config.price_change_lookback_days,
        )
    }

    pub fn lookback_days(&self) -> usize {
        self.lookback_days
    }
}

impl MarketDataSource for ProviderHub {
    fn name(&self) -> &str {
        "provider_hub"
    }

    fn price_history<'a>(&'a self, symbol: &'a str, range: HistoryRange) -> SourceFuture<'a, PriceSeries> {
        Box::pin(async move { self.yahoo.get_history(symbol, range).await })
    }

    fn price_change_pct<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, f64> {
        Box::pin(async move {
            let range = if self.lookback_days < 20 {
                HistoryRange::OneMonth
            } else {
                HistoryRange::OneYear
            };
            let history = self.yahoo.get_history(symbol, range).await?;
            let change = history
                .change_pct(self.lookback_days)
                .ok_or_else(|| SourceError::NoData(symbol.to_string()))?;
            debug!("{} moved {:.2}% over {} sessions", symbol, change, self.lookback_days);
            Ok(change)
        })
    }

    fn technical_report<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, TechnicalReport> {
        Box::pin(async move {
            let client = self.finnhub.as_ref().ok_or(SourceError::MissingApiKey("Finnhub"))?;
            client.get_technical_report(symbol).await
        })
    }

    fn sentiment_scores<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<f64>> {
        Box::pin(async move {
            let client = self
                .alphavantage
                .as_ref()
                .ok_or(SourceError::MissingApiKey("Alpha Vantage"))?;
            client.get_sentiment_scores(symbol).await
        })
    }
}
