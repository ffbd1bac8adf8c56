//! In-memory market data source shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tickerscope::sources::{MarketDataSource, SourceError, SourceFuture};
use tickerscope::types::{HistoryRange, PricePoint, PriceSeries, ProviderSummary, TechnicalReport};

/// Scripted [`MarketDataSource`] that counts upstream calls and can fail per symbol and term.
#[derive(Default)]
pub struct MockSource {
    prices: HashMap<String, f64>,
    reports: HashMap<String, TechnicalReport>,
    sentiment: HashMap<String, Vec<f64>>,
    histories: HashMap<String, PriceSeries>,
    fail_price: HashSet<String>,
    fail_technical: HashSet<String>,
    fail_sentiment: HashSet<String>,
    delay: Option<Duration>,
    pub price_calls: AtomicUsize,
    pub technical_calls: AtomicUsize,
    pub sentiment_calls: AtomicUsize,
    price_in_flight: AtomicUsize,
    pub max_price_in_flight: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all three ranking inputs for a symbol.
    pub fn with_security(
        mut self,
        symbol: &str,
        price_change_pct: f64,
        report: TechnicalReport,
        sentiment: Vec<f64>,
    ) -> Self {
        self.prices.insert(symbol.to_string(), price_change_pct);
        self.reports.insert(symbol.to_string(), report);
        self.sentiment.insert(symbol.to_string(), sentiment);
        self
    }

    pub fn with_history(mut self, series: PriceSeries) -> Self {
        self.histories.insert(series.symbol.clone(), series);
        self
    }

    /// Every lookup for the symbol fails.
    pub fn failing(mut self, symbol: &str) -> Self {
        self.fail_price.insert(symbol.to_string());
        self.fail_technical.insert(symbol.to_string());
        self.fail_sentiment.insert(symbol.to_string());
        self
    }

    pub fn failing_sentiment(mut self, symbol: &str) -> Self {
        self.fail_sentiment.insert(symbol.to_string());
        self
    }

    pub fn failing_technical(mut self, symbol: &str) -> Self {
        self.fail_technical.insert(symbol.to_string());
        self
    }

    /// Hold every price lookup open for a while so overlap can be observed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn technical_calls(&self) -> usize {
        self.technical_calls.load(Ordering::SeqCst)
    }

    pub fn sentiment_calls(&self) -> usize {
        self.sentiment_calls.load(Ordering::SeqCst)
    }

    pub fn max_price_in_flight(&self) -> usize {
        self.max_price_in_flight.load(Ordering::SeqCst)
    }
}

impl MarketDataSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn price_history<'a>(&'a self, symbol: &'a str, _range: HistoryRange) -> SourceFuture<'a, PriceSeries> {
        Box::pin(async move {
            self.histories
                .get(symbol)
                .cloned()
                .ok_or_else(|| SourceError::NoData(symbol.to_string()))
        })
    }

    fn price_change_pct<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, f64> {
        Box::pin(async move {
            self.price_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.price_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_price_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.price_in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_price.contains(symbol) {
                return Err(SourceError::Status(503));
            }
            self.prices
                .get(symbol)
                .copied()
                .ok_or_else(|| SourceError::NoData(symbol.to_string()))
        })
    }

    fn technical_report<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, TechnicalReport> {
        Box::pin(async move {
            self.technical_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_technical.contains(symbol) {
                return Err(SourceError::Request("connection reset".to_string()));
            }
            self.reports
                .get(symbol)
                .cloned()
                .ok_or_else(|| SourceError::NoData(symbol.to_string()))
        })
    }

    fn sentiment_scores<'a>(&'a self, symbol: &'a str) -> SourceFuture<'a, Vec<f64>> {
        Box::pin(async move {
            self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_sentiment.contains(symbol) {
                return Err(SourceError::MissingApiKey("Alpha Vantage"));
            }
            self.sentiment
                .get(symbol)
                .cloned()
                .ok_or_else(|| SourceError::NoData(symbol.to_string()))
        })
    }
}

/// Technical report carrying a provider score and decision label.
pub fn scored_report(score: f64, decision: &str) -> TechnicalReport {
    TechnicalReport {
        score: Some(score),
        decision: Some(decision.to_string()),
        ..TechnicalReport::default()
    }
}

/// Technical report carrying only buy/neutral/sell counts.
pub fn counted_report(buy: u32, neutral: u32, sell: u32) -> TechnicalReport {
    TechnicalReport {
        summary: Some(ProviderSummary::new(buy, neutral, sell)),
        ..TechnicalReport::default()
    }
}

/// Daily close-only series following `f(i)`.
pub fn series_from<F: Fn(usize) -> f64>(symbol: &str, count: usize, f: F) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let points = (0..count)
        .map(|i| PricePoint::close_only(start + chrono::Duration::days(i as i64), f(i)))
        .collect();
    PriceSeries::sanitized(symbol, points)
}
