//! Price momentum.

pub const DEFAULT_MOMENTUM_PERIOD: usize = 10;

/// `values[i] - values[i - period]`; output length is `values.len() - period`.
pub fn momentum_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    if values.len() <= period {
        return Vec::new();
    }
    (period..values.len()).map(|i| values[i] - values[i - period]).collect()
}
