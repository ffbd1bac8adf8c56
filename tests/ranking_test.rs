//! Ranking engine tests against an in-memory data source.

mod common;

use common::{counted_report, scored_report, MockSource};
use std::sync::Arc;
use std::time::Duration;
use tickerscope::config::{CacheTtls, RankingConfig, RankingWeights};
use tickerscope::services::RankingEngine;
use tickerscope::types::{BiasDecision, TieBreak};

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn engine(source: Arc<MockSource>, config: RankingConfig) -> RankingEngine {
    RankingEngine::new(source, config)
}

#[tokio::test]
async fn test_stronger_security_ranks_first() {
    let source = Arc::new(
        MockSource::new()
            .with_security("B", 0.0, scored_report(50.0, "Neutral bias"), vec![])
            .with_security("A", 20.0, scored_report(80.0, "Bullish bias"), vec![0.5]),
    );
    let engine = engine(source, RankingConfig::default());

    let ranked = engine.rank(&symbols(&["B", "A"])).await;

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].symbol, "A");
    assert_eq!(ranked[1].symbol, "B");
    assert!((ranked[0].composite_score - 3.45).abs() < 1e-9);
    assert!((ranked[1].composite_score - 0.5).abs() < 1e-9);
    assert_eq!(ranked[0].technical_bias, 1);
    assert_eq!(ranked[1].technical_bias, 0);
    assert!(!ranked[0].degraded.any());
    assert!(!ranked[1].degraded.any());
}

#[tokio::test]
async fn test_one_failure_in_batch_of_five() {
    let source = Arc::new(
        MockSource::new()
            .with_security("AAPL", 2.0, scored_report(60.0, "buy"), vec![0.1])
            .with_security("MSFT", 1.0, scored_report(55.0, "neutral"), vec![0.2])
            .with_security("NVDA", 5.0, scored_report(70.0, "buy"), vec![0.3])
            .with_security("AMZN", -1.0, scored_report(40.0, "sell"), vec![-0.1])
            .with_security("TSLA", 3.0, scored_report(65.0, "buy"), vec![0.4])
            .failing("TSLA"),
    );
    let engine = engine(source, RankingConfig::default());

    let ranked = engine.rank(&symbols(&["AAPL", "MSFT", "NVDA", "AMZN", "TSLA"])).await;

    assert_eq!(ranked.len(), 5);
    let failed = ranked.iter().find(|r| r.symbol == "TSLA").unwrap();
    assert_eq!(failed.composite_score, 0.0);
    assert!(failed.degraded.price && failed.degraded.technical && failed.degraded.sentiment);

    let healthy: Vec<_> = ranked.iter().filter(|r| r.symbol != "TSLA").collect();
    assert_eq!(healthy.len(), 4);
    assert!(healthy.iter().all(|r| !r.degraded.any()));
    assert_eq!(ranked[0].symbol, "NVDA");
}

#[tokio::test]
async fn test_single_term_degradation() {
    let source = Arc::new(
        MockSource::new()
            .with_security("AAPL", 10.0, scored_report(60.0, "buy"), vec![0.9])
            .failing_sentiment("AAPL"),
    );
    let engine = engine(source, RankingConfig::default());

    let row = engine.score_security("AAPL").await;

    assert!(row.degraded.sentiment);
    assert!(!row.degraded.price);
    assert!(!row.degraded.technical);
    assert_eq!(row.sentiment_score, 0.0);
    // 10/10 + 60/100 + 1*0.5
    assert!((row.composite_score - 2.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_zero_sentiment_is_not_degradation() {
    let source = Arc::new(MockSource::new().with_security("AAPL", 0.0, scored_report(0.0, "neutral"), vec![]));
    let engine = engine(source, RankingConfig::default());

    let row = engine.score_security("AAPL").await;

    assert_eq!(row.composite_score, 0.0);
    assert!(!row.degraded.any());
}

#[tokio::test]
async fn test_lookups_are_cached_between_passes() {
    let source = Arc::new(
        MockSource::new()
            .with_security("AAPL", 1.0, scored_report(50.0, "buy"), vec![0.1])
            .with_security("MSFT", 2.0, scored_report(50.0, "sell"), vec![0.2]),
    );
    let engine = engine(source.clone(), RankingConfig::default());
    let list = symbols(&["AAPL", "MSFT"]);

    let first = engine.rank(&list).await;
    let second = engine.rank(&list).await;

    assert_eq!(first, second);
    assert_eq!(source.price_calls(), 2);
    assert_eq!(source.technical_calls(), 2);
    assert_eq!(source.sentiment_calls(), 2);
}

#[tokio::test]
async fn test_expired_entries_are_recomputed() {
    let source = Arc::new(MockSource::new().with_security("AAPL", 1.0, scored_report(50.0, "buy"), vec![]));
    let config = RankingConfig {
        ttls: CacheTtls {
            overview: Duration::ZERO,
            sentiment: Duration::ZERO,
            technical: Duration::from_secs(3600),
        },
        ..RankingConfig::default()
    };
    let engine = engine(source.clone(), config);

    engine.score_security("AAPL").await;
    engine.score_security("AAPL").await;

    assert_eq!(source.price_calls(), 2);
    assert_eq!(source.sentiment_calls(), 2);
    assert_eq!(source.technical_calls(), 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let source = Arc::new(MockSource::new().failing("AAPL"));
    let engine = engine(source.clone(), RankingConfig::default());

    engine.score_security("AAPL").await;
    engine.score_security("AAPL").await;

    assert_eq!(source.price_calls(), 2);
    assert_eq!(source.technical_calls(), 2);
    assert_eq!(source.sentiment_calls(), 2);
}

#[tokio::test]
async fn test_batches_bound_concurrency() {
    let list: Vec<String> = (0..12).map(|i| format!("S{:02}", i)).collect();
    let source = list
        .iter()
        .enumerate()
        .fold(MockSource::new(), |source, (i, symbol)| {
            source.with_security(symbol, i as f64, scored_report(50.0, "neutral"), vec![])
        })
        .with_delay(Duration::from_millis(20));
    let source = Arc::new(source);
    let config = RankingConfig {
        batch_size: 5,
        ..RankingConfig::default()
    };
    let engine = engine(source.clone(), config);

    let ranked = engine.rank(&list).await;

    assert_eq!(ranked.len(), 12);
    assert_eq!(source.price_calls(), 12);
    assert!(source.max_price_in_flight() <= 5);
    assert!(source.max_price_in_flight() >= 2);
    assert_eq!(ranked[0].symbol, "S11");
    assert_eq!(ranked[11].symbol, "S00");
}

#[tokio::test]
async fn test_top_n_truncates() {
    let source = Arc::new(
        MockSource::new()
            .with_security("A", 3.0, scored_report(50.0, "neutral"), vec![])
            .with_security("B", 2.0, scored_report(50.0, "neutral"), vec![])
            .with_security("C", 1.0, scored_report(50.0, "neutral"), vec![]),
    );
    let config = RankingConfig {
        top_n: Some(2),
        ..RankingConfig::default()
    };
    let engine = engine(source, config);
    let list = symbols(&["C", "B", "A"]);

    let ranked = engine.rank(&list).await;
    assert_eq!(ranked.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);

    let ranked = engine.rank_top(&list, Some(1)).await;
    assert_eq!(ranked.len(), 1);

    let ranked = engine.rank_top(&list, None).await;
    assert_eq!(ranked.len(), 3);
}

#[tokio::test]
async fn test_tie_break_policies() {
    let source = Arc::new(
        MockSource::new()
            .with_security("MSFT", 1.0, scored_report(50.0, "neutral"), vec![])
            .with_security("AAPL", 1.0, scored_report(50.0, "neutral"), vec![]),
    );
    let list = symbols(&["MSFT", "AAPL"]);

    let by_input = engine(source.clone(), RankingConfig::default());
    let ranked = by_input.rank(&list).await;
    assert_eq!(ranked[0].symbol, "MSFT");
    assert_eq!(ranked[1].symbol, "AAPL");

    let by_symbol = engine(
        source,
        RankingConfig {
            tie_break: TieBreak::Symbol,
            ..RankingConfig::default()
        },
    );
    let ranked = by_symbol.rank(&list).await;
    assert_eq!(ranked[0].symbol, "AAPL");
    assert_eq!(ranked[1].symbol, "MSFT");
}

#[tokio::test]
async fn test_technical_score_falls_back_to_summary() {
    let source = Arc::new(MockSource::new().with_security("AAPL", 0.0, counted_report(10, 20, 70), vec![]));
    let engine = engine(source, RankingConfig::default());

    let snapshot = engine.technical_snapshot("AAPL").await.unwrap();
    assert_eq!(snapshot.decision, BiasDecision::Bearish);
    assert!((snapshot.score - 20.0).abs() < 1e-9);

    let row = engine.score_security("AAPL").await;
    assert_eq!(row.technical_bias, -1);
    // 20/100 - 0.5
    assert!((row.composite_score - (-0.3)).abs() < 1e-9);
}

#[tokio::test]
async fn test_custom_weights_and_threshold() {
    let source = Arc::new(MockSource::new().with_security("AAPL", 5.0, counted_report(6, 0, 4), vec![1.0]));
    let config = RankingConfig {
        weights: RankingWeights {
            price_divisor: 5.0,
            technical_divisor: 1000.0,
            bias_weight: 2.0,
            sentiment_weight: 0.0,
        },
        bias_threshold: 25.0,
        ..RankingConfig::default()
    };
    let engine = engine(source, config);

    let row = engine.score_security("AAPL").await;

    // bias 20 is inside the widened threshold
    assert_eq!(row.technical_bias, 0);
    // 5/5 + 60/1000
    assert!((row.composite_score - 1.06).abs() < 1e-9);
}

#[tokio::test]
async fn test_symbols_are_normalized() {
    let source = Arc::new(MockSource::new().with_security("AAPL", 1.0, scored_report(50.0, "buy"), vec![]));
    let engine = engine(source, RankingConfig::default());

    let ranked = engine.rank(&symbols(&[" aapl ", ""])).await;
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].symbol, "AAPL");
}
