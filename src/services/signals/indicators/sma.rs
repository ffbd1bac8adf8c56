//! Simple Moving Average (SMA).

/// Sliding-window arithmetic mean.
///
/// Output length is `values.len() - period + 1`; a `period` of zero is
/// treated as 1. Returns an empty series when there is not enough data.
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    if values.len() < period {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    out.push(sum / period as f64);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out.push(sum / period as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_basic() {
        assert_eq!(sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_length() {
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        assert_eq!(sma_series(&values, 20).len(), 11);
    }

    #[test]
    fn test_sma_period_zero_clamped() {
        assert_eq!(sma_series(&[4.0, 5.0], 0), vec![4.0, 5.0]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma_series(&[1.0, 2.0], 3).is_empty());
        assert!(sma_series(&[], 3).is_empty());
    }
}
