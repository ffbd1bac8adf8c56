//! Long-only single-asset backtests and walk-forward evaluation.
//!
//! Position for bar `i` is decided from data up to and including bar `i`
//! and applied to the return from `i - 1` to `i`.

use crate::services::features::{expanding_sma, mean_pstdev, simple_return};
use crate::types::{BacktestMetrics, BacktestReport, Strategy, WalkForwardFold, WalkForwardReport};
use tracing::debug;
use uuid::Uuid;

/// Trading days per year used to annualize the Sharpe ratio.
const TRADING_DAYS: f64 = 252.0;

/// Denominator used when returns have zero dispersion.
const MIN_STDEV: f64 = 1e-9;

/// Bars past the slow window a walk-forward fold needs.
const MIN_FOLD_SLACK: usize = 5;

/// Bars past the slow window the whole history needs.
const MIN_HISTORY_SLACK: usize = 50;

/// Smallest walk-forward fold.
const MIN_FOLD_SIZE: usize = 50;

/// Per-bar position (0 flat, 1 long) for a strategy.
fn positions(closes: &[f64], strategy: Strategy) -> Vec<f64> {
    match strategy {
        Strategy::MaCrossover { fast, slow } => {
            let fasts = expanding_sma(closes, fast);
            let slows = expanding_sma(closes, slow);
            fasts
                .iter()
                .zip(&slows)
                .map(|(f, s)| if f >= s { 1.0 } else { 0.0 })
                .collect()
        }
        Strategy::Momentum { lookback } => (0..closes.len())
            .map(|i| {
                if lookback > 0 && i >= lookback && simple_return(closes[i - lookback], closes[i]) > 0.0 {
                    1.0
                } else {
                    0.0
                }
            })
            .collect(),
    }
}

/// Equity curve starting at 1.0.
pub fn equity_curve(closes: &[f64], strategy: Strategy) -> Vec<f64> {
    let positions = positions(closes, strategy);
    let mut equity = Vec::with_capacity(closes.len().max(1));
    equity.push(1.0);
    for i in 1..closes.len() {
        let r = simple_return(closes[i - 1], closes[i]);
        let prev = equity[i - 1];
        equity.push(prev * (1.0 + positions[i] * r));
    }
    equity
}

/// Annualized Sharpe ratio and maximum drawdown of an equity curve.
pub fn metrics(equity: &[f64]) -> BacktestMetrics {
    let returns: Vec<f64> = equity
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { w[1] / w[0] - 1.0 })
        .collect();

    let sharpe = if returns.is_empty() {
        0.0
    } else {
        let (mean, sd) = mean_pstdev(&returns);
        let sd = if sd == 0.0 { MIN_STDEV } else { sd };
        mean / sd * TRADING_DAYS.sqrt()
    };

    let mut peak = equity.first().copied().unwrap_or(1.0);
    let mut max_drawdown: f64 = 0.0;
    for &value in equity {
        peak = peak.max(value);
        if peak > 0.0 {
            max_drawdown = max_drawdown.min(value / peak - 1.0);
        }
    }

    BacktestMetrics { sharpe, max_drawdown }
}

/// Run a strategy over a close series.
pub fn backtest(closes: &[f64], strategy: Strategy) -> BacktestReport {
    let equity = if closes.is_empty() {
        Vec::new()
    } else {
        equity_curve(closes, strategy)
    };
    let metrics = if equity.is_empty() {
        BacktestMetrics::default()
    } else {
        metrics(&equity)
    };

    debug!(
        "Backtest {:?} over {} bars: sharpe={:.3} max_dd={:.3}",
        strategy,
        closes.len(),
        metrics.sharpe,
        metrics.max_drawdown
    );

    BacktestReport {
        id: Uuid::new_v4(),
        strategy,
        metrics,
        equity,
    }
}

/// Split the history into `folds` consecutive segments and backtest an MA
/// crossover on each.
///
/// Requires `slow + 50` bars overall; segments shorter than `slow + 5` bars
/// are skipped. `folds` is capped so no segment is shorter than 50 bars.
/// Averages are zero when no fold qualifies.
pub fn walk_forward(closes: &[f64], folds: usize, fast: usize, slow: usize) -> WalkForwardReport {
    let n = closes.len();
    if n < slow.saturating_add(MIN_HISTORY_SLACK) {
        return WalkForwardReport::default();
    }

    let folds = folds.clamp(1, (n / MIN_FOLD_SIZE).max(1));
    let fold_size = MIN_FOLD_SIZE.max(n / folds);
    let min_fold_len = slow.saturating_add(MIN_FOLD_SLACK);
    let strategy = Strategy::MaCrossover { fast, slow };

    let results: Vec<WalkForwardFold> = (0..folds)
        .filter_map(|i| {
            let start = i.saturating_mul(fold_size).min(n);
            let end = (i + 1).saturating_mul(fold_size).min(n);
            if end - start < min_fold_len {
                return None;
            }
            let equity = equity_curve(&closes[start..end], strategy);
            Some(WalkForwardFold {
                fold: i + 1,
                start,
                end,
                metrics: metrics(&equity),
            })
        })
        .collect();

    if results.is_empty() {
        return WalkForwardReport::default();
    }

    let count = results.len() as f64;
    let average = BacktestMetrics {
        sharpe: results.iter().map(|f| f.metrics.sharpe).sum::<f64>() / count,
        max_drawdown: results.iter().map(|f| f.metrics.max_drawdown).sum::<f64>() / count,
    };

    WalkForwardReport {
        folds: results,
        average,
    }
}
