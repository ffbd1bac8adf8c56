//! Buy/neutral/sell aggregation into a composite decision.

use super::normalizer;
use crate::types::{
    BiasDecision, CompositeSummary, ProviderSummary, SummarySource, TechnicalReport,
};

/// Default percentage-point distance between buy and sell share needed for a
/// non-neutral decision.
pub const DEFAULT_BIAS_THRESHOLD: f64 = 10.0;

/// Turns provider summaries or normalizer tallies into a [`CompositeSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScorer {
    bias_threshold: f64,
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self {
            bias_threshold: DEFAULT_BIAS_THRESHOLD,
        }
    }
}

impl CompositeScorer {
    pub fn new(bias_threshold: f64) -> Self {
        Self { bias_threshold }
    }

    pub fn bias_threshold(&self) -> f64 {
        self.bias_threshold
    }

    /// Decision for a given `buy_pct - sell_pct`.
    pub fn decide(&self, bias: f64) -> BiasDecision {
        if bias > self.bias_threshold {
            BiasDecision::Bullish
        } else if bias < -self.bias_threshold {
            BiasDecision::Bearish
        } else {
            BiasDecision::Neutral
        }
    }

    /// Summarize explicit buy/neutral/sell counts.
    pub fn from_counts(&self, counts: ProviderSummary, source: SummarySource) -> CompositeSummary {
        let total = counts.total().max(1) as f64;
        let buy_pct = counts.buy as f64 / total * 100.0;
        let neutral_pct = counts.neutral as f64 / total * 100.0;
        let sell_pct = counts.sell as f64 / total * 100.0;
        let bias = buy_pct - sell_pct;

        CompositeSummary {
            buy_count: counts.buy,
            neutral_count: counts.neutral,
            sell_count: counts.sell,
            buy_pct,
            neutral_pct,
            sell_pct,
            bias,
            decision: self.decide(bias),
            source,
        }
    }

    /// Summarize a full provider payload.
    ///
    /// Uses the provider's own counts when they are present and non-empty;
    /// otherwise every indicator category is run through the normalizer and
    /// tallied.
    pub fn summarize(&self, report: &TechnicalReport) -> CompositeSummary {
        match report.summary {
            Some(summary) if summary.total() > 0 => {
                self.from_counts(summary, SummarySource::Provider)
            }
            _ => {
                let tally = normalizer::tally(report.all_records());
                self.from_counts(tally.into(), SummarySource::Tallied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scorer() -> CompositeScorer {
        CompositeScorer::default()
    }

    #[test]
    fn test_decision_boundaries() {
        let s = scorer();
        let bullish = s.from_counts(ProviderSummary::new(70, 20, 10), SummarySource::Provider);
        assert!((bullish.bias - 60.0).abs() < 1e-9);
        assert_eq!(bullish.decision, BiasDecision::Bullish);

        let bearish = s.from_counts(ProviderSummary::new(10, 20, 70), SummarySource::Provider);
        assert!((bearish.bias + 60.0).abs() < 1e-9);
        assert_eq!(bearish.decision, BiasDecision::Bearish);

        let neutral = s.from_counts(ProviderSummary::new(34, 33, 33), SummarySource::Provider);
        assert!((neutral.bias - 1.0).abs() < 1e-9);
        assert_eq!(neutral.decision, BiasDecision::Neutral);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let s = scorer();
        assert_eq!(s.decide(10.0), BiasDecision::Neutral);
        assert_eq!(s.decide(10.0001), BiasDecision::Bullish);
        assert_eq!(s.decide(-10.0), BiasDecision::Neutral);
        assert_eq!(s.decide(-10.0001), BiasDecision::Bearish);
    }

    #[test]
    fn test_custom_threshold() {
        let s = CompositeScorer::new(25.0);
        let summary = s.from_counts(ProviderSummary::new(5, 3, 2), SummarySource::Tallied);
        // bias = 30
        assert_eq!(summary.decision, BiasDecision::Bullish);
        let summary = s.from_counts(ProviderSummary::new(4, 4, 2), SummarySource::Tallied);
        // bias = 20
        assert_eq!(summary.decision, BiasDecision::Neutral);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let summary = scorer().from_counts(ProviderSummary::new(7, 5, 1), SummarySource::Provider);
        let total = summary.buy_pct + summary.neutral_pct + summary.sell_pct;
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_counts_do_not_divide_by_zero() {
        let summary = scorer().from_counts(ProviderSummary::default(), SummarySource::Tallied);
        assert_eq!(summary.buy_pct, 0.0);
        assert_eq!(summary.sell_pct, 0.0);
        assert_eq!(summary.decision, BiasDecision::Neutral);
    }

    #[test]
    fn test_summarize_prefers_provider_counts() {
        let report: TechnicalReport = serde_json::from_value(json!({
            "summary": {"buy": 2, "neutral": 0, "sell": 8},
            "indicators": [{"name": "x", "signal": "bullish"}]
        }))
        .unwrap();
        let summary = scorer().summarize(&report);
        assert_eq!(summary.source, SummarySource::Provider);
        assert_eq!(summary.decision, BiasDecision::Bearish);
    }

    #[test]
    fn test_summarize_falls_back_to_tally() {
        let report: TechnicalReport = serde_json::from_value(json!({
            "summary": {"buy": 0, "neutral": 0, "sell": 0},
            "indicators": [{"name": "RSI", "signal": "Bullish"}],
            "sma": [{"name": "SMA 50", "color": "positive"}],
            "ema": [{"name": "EMA 20", "indication": "neutral"}],
            "oscillators": [{"name": "Stoch", "signal": "bullish"}],
            "candlestickPatterns": [{"name": "Engulfing", "signal": "Bearish Engulfing"}]
        }))
        .unwrap();
        let summary = scorer().summarize(&report);
        assert_eq!(summary.source, SummarySource::Tallied);
        assert_eq!(summary.buy_count, 3);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.sell_count, 1);
        assert_eq!(summary.decision, BiasDecision::Bullish);
    }

    #[test]
    fn test_summarize_counts_near_u32_max() {
        let report: TechnicalReport = serde_json::from_value(json!({
            "summary": {"buy": u32::MAX, "neutral": 1, "sell": 0}
        }))
        .unwrap();
        let summary = scorer().summarize(&report);
        assert_eq!(summary.source, SummarySource::Provider);
        assert_eq!(summary.buy_count, u32::MAX);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.decision, BiasDecision::Bullish);
        assert!(summary.buy_pct > 99.9 && summary.buy_pct <= 100.0);

        let total = summary.buy_pct + summary.neutral_pct + summary.sell_pct;
        assert!((total - 100.0).abs() < 1e-9);

        let saturated = ProviderSummary::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(saturated.total(), 3 * u64::from(u32::MAX));
        let summary = scorer().from_counts(saturated, SummarySource::Provider);
        assert_eq!(summary.decision, BiasDecision::Neutral);
    }

    #[test]
    fn test_summarize_empty_report() {
        let summary = scorer().summarize(&TechnicalReport::default());
        assert_eq!(summary.buy_count + summary.neutral_count + summary.sell_count, 0);
        assert_eq!(summary.decision, BiasDecision::Neutral);
    }
}
