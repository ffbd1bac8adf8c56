//! Technical indicator implementations.
//!
//! Every function here is a pure transform over pre-filtered numeric input.
//! None of them fail: too little data produces an empty series.

pub mod cci;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams;

pub use cci::{cci_series, DEFAULT_CCI_PERIOD};
pub use ema::ema_series;
pub use macd::{macd, macd_line, MacdSeries, DEFAULT_FAST_PERIOD, DEFAULT_SIGNAL_PERIOD, DEFAULT_SLOW_PERIOD};
pub use momentum::{momentum_series, DEFAULT_MOMENTUM_PERIOD};
pub use rsi::{rsi_series, DEFAULT_RSI_PERIOD};
pub use sma::sma_series;
pub use stochastic::{stoch_rsi_series, stochastic_k, DEFAULT_STOCHASTIC_PERIOD};
pub use williams::{williams_r, DEFAULT_WILLIAMS_PERIOD};

use crate::types::{IndicatorPanel, PriceSeries};

/// Compute every display series for a sanitized price history.
pub fn compute_panel(series: &PriceSeries) -> IndicatorPanel {
    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();

    IndicatorPanel {
        symbol: series.symbol.clone(),
        bars: closes.len(),
        // Trend
        sma20: sma_series(&closes, 20),
        sma50: sma_series(&closes, 50),
        ema12: ema_series(&closes, 12),
        ema26: ema_series(&closes, 26),
        macd: macd_line(&closes, DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD),
        // Momentum
        rsi14: rsi_series(&closes, DEFAULT_RSI_PERIOD),
        stochastic_k: stochastic_k(&highs, &lows, &closes, DEFAULT_STOCHASTIC_PERIOD),
        cci20: cci_series(&highs, &lows, &closes, DEFAULT_CCI_PERIOD),
        momentum10: momentum_series(&closes, DEFAULT_MOMENTUM_PERIOD),
        williams_r: williams_r(&highs, &lows, &closes, DEFAULT_WILLIAMS_PERIOD),
        stoch_rsi: stoch_rsi_series(&closes, DEFAULT_STOCHASTIC_PERIOD),
    }
}
