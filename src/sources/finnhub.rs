//! Finnhub API client for aggregate technical signals.
//!
//! The aggregate-indicator endpoint already publishes buy/neutral/sell
//! counts, so its payload maps straight onto a provider summary.

use super::SourceError;
use crate::types::{ProviderSummary, TechnicalReport};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Upper bound on one Finnhub round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Aggregate indicator response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinnhubAggregate {
    pub technical_analysis: Option<FinnhubTechnicalAnalysis>,
    pub trend: Option<FinnhubTrend>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubTechnicalAnalysis {
    pub count: Option<ProviderSummary>,
    /// "buy", "sell" or "neutral".
    pub signal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubTrend {
    pub adx: Option<f64>,
    pub trending: Option<bool>,
}

impl FinnhubAggregate {
    /// Map onto the provider-neutral report shape.
    pub fn into_report(self) -> TechnicalReport {
        let (summary, decision) = match self.technical_analysis {
            Some(ta) => (ta.count, ta.signal),
            None => (None, None),
        };

        TechnicalReport {
            summary,
            decision,
            ..TechnicalReport::default()
        }
    }
}

/// Finnhub API client.
pub struct FinnhubClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubClient {
    /// Create a new Finnhub client.
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, FINNHUB_URL, REQUEST_TIMEOUT)
    }

    /// Client against a specific base URL with its own request timeout.
    pub fn with_endpoint(api_key: String, base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the daily aggregate indicator for a symbol.
    pub async fn get_aggregate_indicator(&self, symbol: &str) -> Result<FinnhubAggregate, SourceError> {
        let url = format!("{}/scan/technical-indicator", self.base_url);

        debug!("Fetching Finnhub aggregate indicator for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("resolution", "D"), ("token", self.api_key.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        Ok(response.json::<FinnhubAggregate>().await?)
    }

    /// Get the technical report for a symbol.
    pub async fn get_technical_report(&self, symbol: &str) -> Result<TechnicalReport, SourceError> {
        let aggregate = self.get_aggregate_indicator(symbol).await?;
        if aggregate.technical_analysis.is_none() {
            return Err(SourceError::NoData(symbol.to_string()));
        }
        Ok(aggregate.into_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_deserialization() {
        let json = r#"{
            "technicalAnalysis": {"count": {"buy": 9, "neutral": 6, "sell": 2}, "signal": "buy"},
            "trend": {"adx": 31.4, "trending": true}
        }"#;
        let aggregate: FinnhubAggregate = serde_json::from_str(json).unwrap();
        let trend = aggregate.trend.clone().unwrap();
        assert_eq!(trend.adx, Some(31.4));
        assert_eq!(trend.trending, Some(true));

        let report = aggregate.into_report();
        assert_eq!(report.summary, Some(ProviderSummary::new(9, 6, 2)));
        assert_eq!(report.decision.as_deref(), Some("buy"));
        assert!(report.indicators.is_empty());
    }

    #[test]
    fn test_aggregate_without_analysis() {
        let aggregate: FinnhubAggregate = serde_json::from_str("{}").unwrap();
        let report = aggregate.into_report();
        assert!(report.summary.is_none());
        assert!(report.decision.is_none());
    }
}
