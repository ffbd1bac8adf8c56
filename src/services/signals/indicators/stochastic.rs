//! Stochastic oscillator and Stochastic RSI.

use super::rsi::rsi_series;

pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;

/// Value reported when the lookback window has no range.
pub const FLAT_WINDOW_K: f64 = 50.0;

/// Stochastic %K over a trailing window:
/// `%K = (close - lowest low) / (highest high - lowest low) * 100`.
///
/// Output length is `n - period + 1` where `n` is the shortest input.
pub fn stochastic_k(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let n = highs.len().min(lows.len()).min(closes.len());
    if n < period {
        return Vec::new();
    }

    (period - 1..n)
        .map(|i| {
            let start = i + 1 - period;
            let lowest_low = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let highest_high = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            percent_of_range(closes[i], lowest_low, highest_high)
        })
        .collect()
}

/// Stochastic formula applied to the RSI series instead of price.
///
/// Output length is `values.len() - 2 * period + 1`.
pub fn stoch_rsi_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let rsi = rsi_series(values, period);
    if rsi.len() < period {
        return Vec::new();
    }

    rsi.windows(period)
        .map(|window| {
            let lowest = window.iter().copied().fold(f64::INFINITY, f64::min);
            let highest = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            percent_of_range(window[period - 1], lowest, highest)
        })
        .collect()
}

fn percent_of_range(value: f64, low: f64, high: f64) -> f64 {
    if high == low {
        return FLAT_WINDOW_K;
    }
    ((value - low) / (high - low) * 100.0).clamp(0.0, 100.0)
}
