//! Point-in-time features and the baseline crossover prediction.

use crate::services::signals::indicators::{ema_series, rsi_series, DEFAULT_RSI_PERIOD};
use crate::types::{FeatureSnapshot, Prediction};

/// Model name reported with every [`Prediction`].
pub const PREDICTION_MODEL: &str = "sma_crossover";

/// Per-bar drift applied by the crossover prediction.
const DRIFT_PER_BAR: f64 = 0.002;

/// Prediction horizon bounds in bars.
const MIN_HORIZON: u32 = 1;
const MAX_HORIZON: u32 = 5;

/// Neutral RSI when the history is too short.
const NEUTRAL_RSI: f64 = 50.0;

/// Simple return from `base` to `value`; a zero base counts as 1.
pub(crate) fn simple_return(base: f64, value: f64) -> f64 {
    let base = if base == 0.0 { 1.0 } else { base };
    (value - base) / base
}

/// Moving average that averages whatever is available until `period` bars exist.
///
/// Same length as the input.
pub(crate) fn expanding_sma(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        out.push(sum / (i + 1).min(period) as f64);
    }
    out
}

/// Mean and population standard deviation.
pub(crate) fn mean_pstdev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Last-bar return over `lag` bars, 0 when the history is too short.
fn lagged_return(closes: &[f64], lag: usize) -> f64 {
    let n = closes.len();
    if n <= lag {
        return 0.0;
    }
    simple_return(closes[n - 1 - lag], closes[n - 1])
}

/// Feature snapshot for the latest bar. `None` for an empty series.
///
/// `vol` is the population standard deviation of the last `days` one-bar
/// returns (all of them when fewer exist); the first bar's return counts as 0.
pub fn features(closes: &[f64], days: usize) -> Option<FeatureSnapshot> {
    let last = *closes.last()?;
    let n = closes.len();

    let mut ret1 = Vec::with_capacity(n);
    ret1.push(0.0);
    ret1.extend(closes.windows(2).map(|w| simple_return(w[0], w[1])));

    let window = if days > 0 && ret1.len() >= days {
        &ret1[ret1.len() - days..]
    } else {
        &ret1[..]
    };
    let (_, vol) = mean_pstdev(window);

    let sma20 = expanding_sma(closes, 20).last().copied().unwrap_or(last);
    let ema50 = ema_series(closes, 50).last().copied().unwrap_or(last);
    let momentum = simple_return(closes[n - n.min(20)], last);
    let rsi = rsi_series(closes, DEFAULT_RSI_PERIOD)
        .last()
        .copied()
        .unwrap_or(NEUTRAL_RSI);

    Some(FeatureSnapshot {
        ret1: lagged_return(closes, 1),
        ret5: lagged_return(closes, 5),
        ret20: lagged_return(closes, 20),
        vol,
        sma20,
        ema50,
        momentum,
        rsi,
    })
}

/// SMA20 vs SMA50 crossover estimate `horizon` bars ahead. `None` for an empty series.
pub fn predict(closes: &[f64], horizon: u32) -> Option<Prediction> {
    let last = *closes.last()?;
    let sma20 = expanding_sma(closes, 20).last().copied().unwrap_or(last);
    let sma50 = expanding_sma(closes, 50).last().copied().unwrap_or(last);

    let direction = if sma20 >= sma50 { 1.0 } else { -1.0 };
    let steps = horizon.clamp(MIN_HORIZON, MAX_HORIZON) as f64;

    Some(Prediction {
        horizon,
        prediction: last * (1.0 + DRIFT_PER_BAR * direction * steps),
        confidence: if direction > 0.0 { 0.55 } else { 0.45 },
        model: PREDICTION_MODEL.to_string(),
    })
}
