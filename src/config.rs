use crate::services::signals::DEFAULT_BIAS_THRESHOLD;
use crate::types::TieBreak;
use std::env;
use std::time::Duration;

/// Symbols ranked when a request does not name any.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMZN", "GOOGL", "META", "TSLA", "JPM", "V", "SPY",
];

/// Weights of the four composite-score terms.
///
/// `score = price / price_divisor + technical / technical_divisor
///        + bias * bias_weight + sentiment * sentiment_weight`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub price_divisor: f64,
    pub technical_divisor: f64,
    pub bias_weight: f64,
    pub sentiment_weight: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            price_divisor: 10.0,
            technical_divisor: 100.0,
            bias_weight: 0.5,
            sentiment_weight: 0.3,
        }
    }
}

/// Freshness window per kind of cached upstream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub overview: Duration,
    pub sentiment: Duration,
    pub technical: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            overview: Duration::from_secs(10 * 60),
            sentiment: Duration::from_secs(10 * 60),
            technical: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Ranking engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub weights: RankingWeights,
    /// Securities fetched concurrently per batch (at least 1).
    pub batch_size: usize,
    /// Truncate the leaderboard to this many rows.
    pub top_n: Option<usize>,
    pub tie_break: TieBreak,
    /// Percentage-point threshold for the bias decision.
    pub bias_threshold: f64,
    pub ttls: CacheTtls,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            batch_size: 5,
            top_n: None,
            tie_break: TieBreak::default(),
            bias_threshold: DEFAULT_BIAS_THRESHOLD,
            ttls: CacheTtls::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Finnhub API key for aggregate technicals.
    pub finnhub_api_key: Option<String>,
    /// Alpha Vantage API key for news sentiment.
    pub alpha_vantage_api_key: Option<String>,
    /// Sessions spanned by the recent price move.
    pub price_change_lookback_days: usize,
    /// Default ranking universe.
    pub ranking_symbols: Vec<String>,
    pub ranking: RankingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4010,
            finnhub_api_key: None,
            alpha_vantage_api_key: None,
            price_change_lookback_days: 5,
            ranking_symbols: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            ranking: RankingConfig::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Comma-separated symbol list, uppercased, blanks dropped.
pub fn parse_symbols(s: &str) -> Vec<String> {
    s.split(',')
        .map(|sym| sym.trim().to_uppercase())
        .filter(|sym| !sym.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        let ranking_defaults = defaults.ranking.clone();
        let weight_defaults = ranking_defaults.weights;
        let ttl_defaults = ranking_defaults.ttls;

        let weights = RankingWeights {
            price_divisor: parse_var("RANK_WEIGHT_PRICE_DIVISOR")
                .filter(|v: &f64| *v != 0.0)
                .unwrap_or(weight_defaults.price_divisor),
            technical_divisor: parse_var("RANK_WEIGHT_TECHNICAL_DIVISOR")
                .filter(|v: &f64| *v != 0.0)
                .unwrap_or(weight_defaults.technical_divisor),
            bias_weight: parse_var("RANK_WEIGHT_BIAS").unwrap_or(weight_defaults.bias_weight),
            sentiment_weight: parse_var("RANK_WEIGHT_SENTIMENT")
                .unwrap_or(weight_defaults.sentiment_weight),
        };

        let ttls = CacheTtls {
            overview: parse_var("OVERVIEW_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(ttl_defaults.overview),
            sentiment: parse_var("SENTIMENT_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(ttl_defaults.sentiment),
            technical: parse_var("TECHNICAL_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(ttl_defaults.technical),
        };

        let ranking = RankingConfig {
            weights,
            batch_size: parse_var::<usize>("RANKING_BATCH_SIZE")
                .unwrap_or(ranking_defaults.batch_size)
                .max(1),
            top_n: parse_var("RANKING_TOP_N"),
            tie_break: env::var("RANKING_TIE_BREAK")
                .ok()
                .and_then(|v| TieBreak::from_str(&v))
                .unwrap_or(ranking_defaults.tie_break),
            bias_threshold: parse_var("BIAS_THRESHOLD").unwrap_or(ranking_defaults.bias_threshold),
            ttls,
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            finnhub_api_key: env::var("FINNHUB_API_KEY").ok().filter(|k| !k.is_empty()),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok().filter(|k| !k.is_empty()),
            price_change_lookback_days: parse_var::<usize>("PRICE_CHANGE_LOOKBACK_DAYS")
                .unwrap_or(defaults.price_change_lookback_days)
                .max(1),
            ranking_symbols: env::var("RANKING_SYMBOLS")
                .ok()
                .map(|s| parse_symbols(&s))
                .filter(|symbols| !symbols.is_empty())
                .unwrap_or(defaults.ranking_symbols),
            ranking,
        }
    }
}
