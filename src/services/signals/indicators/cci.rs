//! Commodity Channel Index (CCI).

pub const DEFAULT_CCI_PERIOD: usize = 20;

/// Lambert's scaling constant.
const CCI_CONSTANT: f64 = 0.015;

/// CCI over typical price `(high + low + close) / 3`:
/// `CCI = (TP - SMA(TP)) / (0.015 * mean deviation)`.
///
/// A window with zero mean deviation yields 0.
pub fn cci_series(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let n = highs.len().min(lows.len()).min(closes.len());
    if n < period {
        return Vec::new();
    }

    let typical: Vec<f64> = (0..n).map(|i| (highs[i] + lows[i] + closes[i]) / 3.0).collect();

    typical
        .windows(period)
        .map(|window| {
            let mean = window.iter().sum::<f64>() / period as f64;
            let mean_dev = mean_deviation(window, mean);
            if mean_dev == 0.0 {
                0.0
            } else {
                (window[period - 1] - mean) / (CCI_CONSTANT * mean_dev)
            }
        })
        .collect()
}

fn mean_deviation(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).abs()).sum::<f64>() / values.len() as f64
}
