//! MACD (Moving Average Convergence Divergence).

use super::ema::ema_series;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// MACD line: fast EMA minus slow EMA, truncated to the shorter series.
pub fn macd_line(values: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ema = ema_series(values, fast);
    let slow_ema = ema_series(values, slow);

    fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect()
}

/// MACD line together with its signal line and histogram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Full MACD: the signal line is an EMA of the MACD line.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let line = macd_line(values, fast, slow);
    let signal = ema_series(&line, signal_period);
    let histogram = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
