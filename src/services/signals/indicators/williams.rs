//! Williams %R.

pub const DEFAULT_WILLIAMS_PERIOD: usize = 14;

/// Value reported when the lookback window has no range.
pub const FLAT_WINDOW_R: f64 = -50.0;

/// `%R = (highest high - close) / (highest high - lowest low) * -100`, in `[-100, 0]`.
pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
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

            if highest_high == lowest_low {
                FLAT_WINDOW_R
            } else {
                ((highest_high - closes[i]) / (highest_high - lowest_low) * -100.0).clamp(-100.0, 0.0)
            }
        })
        .collect()
}
