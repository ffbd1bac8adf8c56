//! Session-scoped memoization keyed by symbol and data kind.
//!
//! TTLs are supplied by the caller on every lookup, so one cache instance
//! can hold entries with different freshness policies. Nothing is evicted:
//! a stale entry is ignored and overwritten on the next computation.

use dashmap::DashMap;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Kind of upstream data a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Recent price move from the price overview.
    Overview,
    /// Average of recent news-sentiment scores.
    Sentiment,
    /// Normalized technical bias and score.
    Technical,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Overview => "overview",
            DataKind::Sentiment => "sentiment",
            DataKind::Technical => "technical",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key format: "{SYMBOL}:{kind}".
pub fn cache_key(symbol: &str, kind: DataKind) -> String {
    format!("{}:{}", symbol.to_uppercase(), kind)
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// A thread-safe memoizing cache with caller-supplied TTLs.
pub struct Cache<V> {
    data: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Get a value if it was stored less than `ttl` ago.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.stored_at.elapsed() < ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.data.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the fresh cached value or compute, store and return a new one.
    ///
    /// The map is not locked while `compute` runs, so two overlapping callers
    /// may both compute; the last one to finish wins.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(key, ttl) {
            debug!("cache hit for {}", key);
            return value;
        }

        debug!("cache miss for {}", key);
        let value = compute().await;
        self.insert(key, value.clone());
        value
    }

    /// Like [`Cache::get_or_compute`] for fallible computations.
    ///
    /// Errors are returned to the caller and never stored.
    pub async fn try_get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key, ttl) {
            debug!("cache hit for {}", key);
            return Ok(value);
        }

        debug!("cache miss for {}", key);
        let value = compute().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.data.clear();
    }

    /// Number of stored entries, including stale ones.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
