//! Yahoo Finance API client for historical stock data.
//!
//! Uses the unofficial chart endpoint (no API key).

use super::SourceError;
use crate::types::{HistoryRange, PricePoint, PriceSeries};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
pub(crate) struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch daily history for a symbol.
    pub async fn get_history(&self, symbol: &str, range: HistoryRange) -> Result<PriceSeries, SourceError> {
        let url = format!(
            "{}/{}?range={}&interval=1d&includePrePost=false",
            YAHOO_CHART_URL,
            normalize_yahoo_symbol(symbol),
            range.as_str()
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: YahooChartResponse = response.json().await?;
        parse_chart(symbol, data)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a chart response into a sanitized series.
///
/// Bars without a close are skipped; optional fields that are missing stay `None`.
pub(crate) fn parse_chart(symbol: &str, data: YahooChartResponse) -> Result<PriceSeries, SourceError> {
    if let Some(error) = data.chart.error {
        return Err(SourceError::Parse(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| SourceError::NoData(symbol.to_string()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| SourceError::NoData(symbol.to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::NoData(symbol.to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    let points = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let close = at(&closes, i)?;
            let date = DateTime::from_timestamp(timestamp, 0)?.date_naive();
            Some(PricePoint {
                date,
                open: at(&opens, i),
                high: at(&highs, i),
                low: at(&lows, i),
                close,
                volume: at(&volumes, i),
            })
        })
        .collect();

    Ok(PriceSeries::sanitized(symbol.to_uppercase(), points))
}
