//! Ranking Engine: weighted composite score per security and a sorted leaderboard.
//!
//! Each security needs three upstream lookups (recent price move, technical
//! assessment, news sentiment). Securities are processed in fixed-size
//! batches: members of a batch are fetched concurrently, batches run one
//! after another. A failing lookup never aborts the pass; the failing term
//! falls back to zero and is flagged in [`RankedSecurity::degraded`].

use crate::config::{RankingConfig, RankingWeights};
use crate::services::cache::{cache_key, Cache, DataKind};
use crate::services::signals::CompositeScorer;
use crate::sources::{MarketDataSource, SourceError};
use crate::types::{
    BiasDecision, Degradation, RankedSecurity, RankingInputs, TechnicalReport, TechnicalSnapshot,
    TieBreak,
};
use futures_util::future::join_all;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Weighted blend of the four ranking terms.
pub fn composite_score(inputs: &RankingInputs, weights: &RankingWeights) -> f64 {
    inputs.price_change_pct / weights.price_divisor
        + inputs.technical_score / weights.technical_divisor
        + f64::from(inputs.technical_bias) * weights.bias_weight
        + inputs.sentiment_score * weights.sentiment_weight
}

/// Mean of per-headline sentiment scores, clamped to `[-1, 1]`.
///
/// Non-finite scores are ignored; no headlines means neutral sentiment.
pub fn average_sentiment(scores: &[f64]) -> f64 {
    let finite: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    (finite.iter().sum::<f64>() / finite.len() as f64).clamp(-1.0, 1.0)
}

/// Drop non-finite scores and sort descending by composite score.
///
/// The sort is stable, so with [`TieBreak::InputOrder`] equal scores keep
/// the order they were appended in.
pub fn sort_leaderboard(rows: Vec<RankedSecurity>, tie_break: TieBreak) -> Vec<RankedSecurity> {
    let mut rows: Vec<RankedSecurity> = rows
        .into_iter()
        .filter(|row| row.composite_score.is_finite())
        .collect();

    rows.sort_by(|a, b| {
        let by_score = b
            .composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal);
        match tie_break {
            TieBreak::InputOrder => by_score,
            TieBreak::Symbol => by_score.then_with(|| a.symbol.cmp(&b.symbol)),
        }
    });
    rows
}

/// Ranks securities against a [`MarketDataSource`], memoizing lookups per symbol.
pub struct RankingEngine {
    source: Arc<dyn MarketDataSource>,
    config: RankingConfig,
    scorer: CompositeScorer,
    overview: Cache<f64>,
    sentiment: Cache<f64>,
    technical: Cache<TechnicalSnapshot>,
}

impl RankingEngine {
    pub fn new(source: Arc<dyn MarketDataSource>, config: RankingConfig) -> Self {
        let scorer = CompositeScorer::new(config.bias_threshold);
        Self {
            source,
            config,
            scorer,
            overview: Cache::new(),
            sentiment: Cache::new(),
            technical: Cache::new(),
        }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn scorer(&self) -> &CompositeScorer {
        &self.scorer
    }

    pub fn source(&self) -> &Arc<dyn MarketDataSource> {
        &self.source
    }

    /// Normalize a raw technical payload.
    ///
    /// The provider's own decision label and score win when present; otherwise
    /// both come from the composite summary, the score being `bias` mapped
    /// from `[-100, 100]` onto `[0, 100]`.
    pub fn assess(&self, report: &TechnicalReport) -> TechnicalSnapshot {
        let summary = self.scorer.summarize(report);
        let decision = report
            .decision
            .as_deref()
            .map(BiasDecision::from_label)
            .unwrap_or(summary.decision);
        let score = report
            .score
            .filter(|s| s.is_finite())
            .unwrap_or((summary.bias + 100.0) / 2.0);

        TechnicalSnapshot {
            score,
            decision,
            summary,
        }
    }

    /// Recent percentage price move, cached under the overview TTL.
    pub async fn price_change(&self, symbol: &str) -> Result<f64, SourceError> {
        let key = cache_key(symbol, DataKind::Overview);
        self.overview
            .try_get_or_compute(&key, self.config.ttls.overview, || {
                self.source.price_change_pct(symbol)
            })
            .await
    }

    /// Normalized technical view, cached under the technical TTL.
    pub async fn technical_snapshot(&self, symbol: &str) -> Result<TechnicalSnapshot, SourceError> {
        let key = cache_key(symbol, DataKind::Technical);
        self.technical
            .try_get_or_compute(&key, self.config.ttls.technical, || async {
                self.source
                    .technical_report(symbol)
                    .await
                    .map(|report| self.assess(&report))
            })
            .await
    }

    /// Average headline sentiment, cached under the sentiment TTL.
    pub async fn sentiment_score(&self, symbol: &str) -> Result<f64, SourceError> {
        let key = cache_key(symbol, DataKind::Sentiment);
        self.sentiment
            .try_get_or_compute(&key, self.config.ttls.sentiment, || async {
                self.source
                    .sentiment_scores(symbol)
                    .await
                    .map(|scores| average_sentiment(&scores))
            })
            .await
    }

    /// Score one security. Never fails: failing terms degrade to zero.
    pub async fn score_security(&self, symbol: &str) -> RankedSecurity {
        let (price, technical, sentiment) = tokio::join!(
            self.price_change(symbol),
            self.technical_snapshot(symbol),
            self.sentiment_score(symbol),
        );

        let mut degraded = Degradation::default();

        let price_change_pct = match price {
            Ok(v) if v.is_finite() => v,
            Ok(v) => {
                warn!("{}: non-finite price change {}, using 0", symbol, v);
                degraded.price = true;
                0.0
            }
            Err(e) => {
                warn!("{}: price term degraded: {}", symbol, e);
                degraded.price = true;
                0.0
            }
        };

        let (technical_score, technical_bias) = match technical {
            Ok(snapshot) => (snapshot.score, snapshot.bias()),
            Err(e) => {
                warn!("{}: technical term degraded: {}", symbol, e);
                degraded.technical = true;
                (0.0, 0)
            }
        };

        let sentiment_score = match sentiment {
            Ok(v) => v,
            Err(e) => {
                warn!("{}: sentiment term degraded: {}", symbol, e);
                degraded.sentiment = true;
                0.0
            }
        };

        let inputs = RankingInputs {
            price_change_pct,
            technical_score,
            technical_bias,
            sentiment_score,
        };
        let composite_score = composite_score(&inputs, &self.config.weights);

        RankedSecurity {
            symbol: symbol.to_string(),
            price_change_pct,
            technical_score,
            technical_bias,
            sentiment_score,
            composite_score,
            degraded,
        }
    }

    /// Rank symbols using the configured top-N.
    pub async fn rank(&self, symbols: &[String]) -> Vec<RankedSecurity> {
        self.rank_top(symbols, self.config.top_n).await
    }

    /// Rank symbols, keeping at most `limit` rows.
    pub async fn rank_top(&self, symbols: &[String], limit: Option<usize>) -> Vec<RankedSecurity> {
        let symbols: Vec<String> = symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        let batch_size = self.config.batch_size.max(1);

        info!(
            "Ranking {} symbols via {} in batches of {}",
            symbols.len(),
            self.source.name(),
            batch_size
        );

        let mut scored = Vec::with_capacity(symbols.len());
        for (i, batch) in symbols.chunks(batch_size).enumerate() {
            debug!("Ranking batch {}: {:?}", i + 1, batch);
            let results = join_all(batch.iter().map(|symbol| self.score_security(symbol))).await;
            scored.extend(results);
        }

        let degraded = scored.iter().filter(|row| row.degraded.any()).count();
        let mut ranked = sort_leaderboard(scored, self.config.tie_break);
        if let Some(n) = limit {
            ranked.truncate(n);
        }

        info!("Ranked {} symbols ({} degraded)", ranked.len(), degraded);
        ranked
    }

    /// Whether a fresh entry of `kind` is memoized for the symbol.
    pub fn is_fresh(&self, symbol: &str, kind: DataKind) -> bool {
        let key = cache_key(symbol, kind);
        let ttls = &self.config.ttls;
        match kind {
            DataKind::Overview => self.overview.get(&key, ttls.overview).is_some(),
            DataKind::Sentiment => self.sentiment.get(&key, ttls.sentiment).is_some(),
            DataKind::Technical => self.technical.get(&key, ttls.technical).is_some(),
        }
    }

    /// Drop every memoized lookup.
    /// Entries currently held across the three lookup caches.
    pub fn cached_entries(&self) -> usize {
        self.overview.len() + self.sentiment.len() + self.technical.len()
    }

    pub fn clear_caches(&self) {
        self.overview.clear();
        self.sentiment.clear();
        self.technical.clear();
    }
}
