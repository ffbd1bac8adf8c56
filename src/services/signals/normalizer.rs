//! Provider annotation normalization.
//!
//! Upstream technical providers disagree on field names: some annotate rows
//! with a `signal` text, some with `indication`, others with a `color` tag.
//! Each known shape is a [`ProviderRecord`] variant; this module adapts every
//! variant into a [`ProviderIndicator`] and classifies it into a [`Signal`].

use crate::types::{ProviderIndicator, ProviderRecord, RawSignal, Signal, SignalTally};
use serde_json::Value;

const UNNAMED: &str = "unnamed";

impl From<&ProviderRecord> for ProviderIndicator {
    fn from(record: &ProviderRecord) -> Self {
        let (name, value, raw_signal) = match record {
            ProviderRecord::Signal(r) => (&r.name, &r.value, RawSignal::Text(r.signal.clone())),
            ProviderRecord::Indication(r) => {
                (&r.name, &r.value, RawSignal::Text(r.indication.clone()))
            }
            ProviderRecord::Color(r) => (&r.name, &r.value, RawSignal::Color(r.color.clone())),
            ProviderRecord::Bare(r) => (&r.name, &r.value, RawSignal::Missing),
            ProviderRecord::Other(_) => {
                return ProviderIndicator {
                    name: UNNAMED.to_string(),
                    value: None,
                    raw_signal: RawSignal::Missing,
                }
            }
        };

        ProviderIndicator {
            name: name.clone().unwrap_or_else(|| UNNAMED.to_string()),
            value: value.as_ref().and_then(numeric_value),
            raw_signal,
        }
    }
}

/// Classify an adapted provider row.
pub fn classify(indicator: &ProviderIndicator) -> Signal {
    classify_raw(&indicator.raw_signal)
}

/// Classify a raw annotation.
///
/// Text containing "bull" (any case) is bullish, text containing "bear" is
/// bearish. Color tags map `positive`/`negative`. Everything else is neutral.
pub fn classify_raw(raw: &RawSignal) -> Signal {
    match raw {
        RawSignal::Text(text) => {
            let lower = text.to_lowercase();
            if lower.contains("bull") {
                Signal::Bullish
            } else if lower.contains("bear") {
                Signal::Bearish
            } else {
                Signal::Neutral
            }
        }
        RawSignal::Color(color) => match color.trim().to_lowercase().as_str() {
            "positive" => Signal::Bullish,
            "negative" => Signal::Bearish,
            _ => Signal::Neutral,
        },
        RawSignal::Missing => Signal::Neutral,
    }
}

/// Adapt and classify a provider row in one step.
pub fn classify_record(record: &ProviderRecord) -> Signal {
    classify(&ProviderIndicator::from(record))
}

/// Tally bullish/bearish/neutral counts over provider rows.
pub fn tally<'a, I>(records: I) -> SignalTally
where
    I: IntoIterator<Item = &'a ProviderRecord>,
{
    records.into_iter().map(classify_record).collect()
}

/// Providers send values as numbers or as strings like "1,234.5" or "12.3%".
fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').replace(',', "").parse().ok(),
        _ => None,
    };
    parsed.filter(|v: &f64| v.is_finite())
}
