use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point-in-time features derived from a close series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub ret1: f64,
    pub ret5: f64,
    pub ret20: f64,
    pub vol: f64,
    pub sma20: f64,
    pub ema50: f64,
    pub momentum: f64,
    pub rsi: f64,
}

/// Next-price estimate from the moving-average crossover model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub horizon: u32,
    pub prediction: f64,
    pub confidence: f64,
    pub model: String,
}

/// Backtest strategy with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    MaCrossover {
        #[serde(default = "default_fast")]
        fast: usize,
        #[serde(default = "default_slow")]
        slow: usize,
    },
    Momentum {
        #[serde(default = "default_lookback")]
        lookback: usize,
    },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::MaCrossover {
            fast: default_fast(),
            slow: default_slow(),
        }
    }
}

fn default_fast() -> usize {
    20
}

fn default_slow() -> usize {
    50
}

fn default_lookback() -> usize {
    20
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestMetrics {
    pub sharpe: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestReport {
    pub id: Uuid,
    pub strategy: Strategy,
    pub metrics: BacktestMetrics,
    pub equity: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkForwardFold {
    pub fold: usize,
    pub start: usize,
    pub end: usize,
    pub metrics: BacktestMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkForwardReport {
    pub folds: Vec<WalkForwardFold>,
    pub average: BacktestMetrics,
}
