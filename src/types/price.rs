use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// History window requested from the market-data collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    #[default]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryRange {
    /// Get the range from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1mo" => Some(HistoryRange::OneMonth),
            "3mo" => Some(HistoryRange::ThreeMonths),
            "6mo" => Some(HistoryRange::SixMonths),
            "1y" => Some(HistoryRange::OneYear),
            "2y" => Some(HistoryRange::TwoYears),
            "5y" => Some(HistoryRange::FiveYears),
            _ => None,
        }
    }

    /// Range string understood by the upstream chart API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
        }
    }

    /// Approximate number of daily sessions in this range.
    pub fn sessions(&self) -> usize {
        match self {
            HistoryRange::OneMonth => 21,
            HistoryRange::ThreeMonths => 63,
            HistoryRange::SixMonths => 126,
            HistoryRange::OneYear => 252,
            HistoryRange::TwoYears => 504,
            HistoryRange::FiveYears => 1260,
        }
    }
}

/// Daily OHLCV bar. Only `close` is guaranteed by every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PricePoint {
    /// Bar with only a closing price.
    pub fn close_only(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// True when every numeric field that is present is finite.
    pub fn is_finite(&self) -> bool {
        let optional_ok = [self.open, self.high, self.low, self.volume]
            .iter()
            .all(|v| v.map_or(true, f64::is_finite));
        self.close.is_finite() && optional_ok
    }

    /// High, falling back to close for close-only bars.
    pub fn high_or_close(&self) -> f64 {
        self.high.unwrap_or(self.close)
    }

    /// Low, falling back to close for close-only bars.
    pub fn low_or_close(&self) -> f64 {
        self.low.unwrap_or(self.close)
    }
}

/// Ordered daily history for one symbol.
///
/// Construction through [`PriceSeries::sanitized`] guarantees ascending dates
/// and finite values, which is what the indicator functions assume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Drop non-finite bars and sort ascending by date.
    pub fn sanitized(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points.into_iter().filter(PricePoint::is_finite).collect();
        points.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::high_or_close).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::low_or_close).collect()
    }

    /// Percentage move of the last close against the close `lookback` bars earlier.
    ///
    /// Uses the first bar when the history is shorter than `lookback`.
    pub fn change_pct(&self, lookback: usize) -> Option<f64> {
        let last = self.points.last()?.close;
        let base_idx = self.points.len().saturating_sub(lookback + 1);
        let base = self.points.get(base_idx)?.close;
        if base == 0.0 {
            return None;
        }
        Some((last - base) / base * 100.0)
    }
}
