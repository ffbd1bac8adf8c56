pub mod backtest;
pub mod cache;
pub mod features;
pub mod ranking;
pub mod signals;

pub use backtest::{backtest, walk_forward};
pub use cache::{cache_key, Cache, DataKind};
pub use features::{features, predict};
pub use ranking::{average_sentiment, composite_score, sort_leaderboard, RankingEngine};
pub use signals::{compute_panel, CompositeScorer, DEFAULT_BIAS_THRESHOLD};
