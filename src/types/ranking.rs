use serde::{Deserialize, Serialize};

use super::{BiasDecision, CompositeSummary};

/// Which per-security terms fell back to their neutral value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Degradation {
    pub price: bool,
    pub technical: bool,
    pub sentiment: bool,
}

impl Degradation {
    /// True when at least one term was replaced by its neutral default.
    pub fn any(&self) -> bool {
        self.price || self.technical || self.sentiment
    }
}

/// Normalized technical view of one security, cached between ranking passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSnapshot {
    /// Roughly 0-100 technical strength.
    pub score: f64,
    pub decision: BiasDecision,
    pub summary: CompositeSummary,
}

impl TechnicalSnapshot {
    /// +1 bullish, -1 bearish, 0 neutral.
    pub fn bias(&self) -> i8 {
        self.decision.direction()
    }
}

/// Per-security inputs to the composite formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingInputs {
    pub price_change_pct: f64,
    pub technical_score: f64,
    pub technical_bias: i8,
    pub sentiment_score: f64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSecurity {
    pub symbol: String,
    pub price_change_pct: f64,
    pub technical_score: f64,
    pub technical_bias: i8,
    pub sentiment_score: f64,
    pub composite_score: f64,
    pub degraded: Degradation,
}

impl RankedSecurity {
    pub fn inputs(&self) -> RankingInputs {
        RankingInputs {
            price_change_pct: self.price_change_pct,
            technical_score: self.technical_score,
            technical_bias: self.technical_bias,
            sentiment_score: self.sentiment_score,
        }
    }
}

/// Ordering among securities whose composite scores are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order the symbols were requested in.
    #[default]
    InputOrder,
    /// Alphabetical by symbol.
    Symbol,
}

impl TieBreak {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "input" | "input_order" => Some(TieBreak::InputOrder),
            "symbol" => Some(TieBreak::Symbol),
            _ => None,
        }
    }
}
