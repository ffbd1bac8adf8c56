//! Exponential Moving Average (EMA).

/// Exponential smoothing with `k = 2 / (period + 1)`.
///
/// Seeds from the first input value, so the output has the same length as
/// the input (no warm-up gap).
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let multiplier = 2.0 / (period as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return out;
    };

    let mut ema = first;
    out.push(ema);
    for &value in iter {
        ema = (value - ema) * multiplier + ema;
        out.push(ema);
    }

    out
}
