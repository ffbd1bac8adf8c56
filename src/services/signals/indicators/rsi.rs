//! Relative Strength Index (RSI).

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Wilder RSI.
///
/// The first `period` price changes seed the average gain/loss; later values
/// use Wilder smoothing. Output length is `values.len() - period`. When the
/// average loss is zero the RSI saturates at 100.
pub fn rsi_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    if values.len() < period + 1 {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);
    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(values.len() - period);
    out.push(rsi_value(avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        out.push(rsi_value(avg_gain, avg_loss));
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_closes(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    fn create_downtrend_closes(count: usize) -> Vec<f64> {
        (0..count).map(|i| 200.0 - i as f64 * 1.5).collect()
    }

    fn create_choppy_closes(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| 100.0 + if i % 2 == 0 { 2.0 } else { -1.0 } + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(rsi_series(&create_uptrend_closes(14), DEFAULT_RSI_PERIOD).is_empty());
    }

    #[test]
    fn test_rsi_length() {
        let out = rsi_series(&create_choppy_closes(50), DEFAULT_RSI_PERIOD);
        assert_eq!(out.len(), 36);
    }

    #[test]
    fn test_rsi_uptrend_saturates() {
        let out = rsi_series(&create_uptrend_closes(50), DEFAULT_RSI_PERIOD);
        assert!(out.iter().all(|v| *v == 100.0));
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let out = rsi_series(&create_downtrend_closes(50), DEFAULT_RSI_PERIOD);
        let last = *out.last().unwrap();
        assert!(last < 50.0, "RSI in downtrend should be < 50, got {}", last);
    }

    #[test]
    fn test_rsi_value_range() {
        let out = rsi_series(&create_choppy_closes(80), DEFAULT_RSI_PERIOD);
        assert!(out.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn test_rsi_custom_period() {
        let out = rsi_series(&create_choppy_closes(20), 7);
        assert_eq!(out.len(), 13);
    }
}
