//! Alpha Vantage API client for news sentiment.
//!
//! Note: Free tier has very limited rate limits (25 requests/day, 5/minute).

use super::SourceError;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const NEWS_LIMIT: &str = "50";

/// Upper bound on one Alpha Vantage round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// News sentiment response.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsSentimentResponse {
    #[serde(default)]
    pub feed: Vec<NewsItem>,
    /// Set instead of `feed` when the quota is exhausted.
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// One headline.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub overall_sentiment_score: Option<f64>,
    #[serde(default)]
    pub ticker_sentiment: Vec<TickerSentiment>,
}

/// Sentiment of one headline towards one ticker.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerSentiment {
    pub ticker: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub ticker_sentiment_score: Option<f64>,
}

impl NewsItem {
    /// Ticker-specific score when present, otherwise the headline's overall score.
    pub fn score_for(&self, symbol: &str) -> Option<f64> {
        self.ticker_sentiment
            .iter()
            .find(|t| t.ticker.eq_ignore_ascii_case(symbol))
            .and_then(|t| t.ticker_sentiment_score)
            .or(self.overall_sentiment_score)
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(-1.0, 1.0))
    }
}

impl NewsSentimentResponse {
    /// Per-headline scores for a symbol.
    pub fn scores_for(&self, symbol: &str) -> Vec<f64> {
        self.feed.iter().filter_map(|item| item.score_for(symbol)).collect()
    }
}

/// Alpha Vantage sends numbers as strings in most payloads.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, ALPHA_VANTAGE_URL, REQUEST_TIMEOUT)
    }

    /// Client against a specific query URL with its own request timeout.
    pub fn with_endpoint(api_key: String, base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    /// Get recent headline sentiment for a symbol.
    pub async fn get_news_sentiment(&self, symbol: &str) -> Result<NewsSentimentResponse, SourceError> {
        debug!("Fetching Alpha Vantage news sentiment for {}", symbol);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", symbol),
                ("limit", NEWS_LIMIT),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: NewsSentimentResponse = response.json().await?;
        if let Some(info) = &data.information {
            if data.feed.is_empty() {
                return Err(SourceError::Request(info.clone()));
            }
        }
        Ok(data)
    }

    /// Per-headline sentiment scores for a symbol.
    pub async fn get_sentiment_scores(&self, symbol: &str) -> Result<Vec<f64>, SourceError> {
        Ok(self.get_news_sentiment(symbol).await?.scores_for(symbol))
    }
}
