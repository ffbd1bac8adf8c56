use serde::{Deserialize, Serialize};

/// Every display series computed for one symbol.
///
/// Each series is shorter than the source history by its own warm-up offset;
/// aligning to dates is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPanel {
    pub symbol: String,
    pub bars: usize,
    pub sma20: Vec<f64>,
    pub sma50: Vec<f64>,
    pub ema12: Vec<f64>,
    pub ema26: Vec<f64>,
    pub rsi14: Vec<f64>,
    pub macd: Vec<f64>,
    pub stochastic_k: Vec<f64>,
    pub cci20: Vec<f64>,
    pub momentum10: Vec<f64>,
    pub williams_r: Vec<f64>,
    pub stoch_rsi: Vec<f64>,
}
