//! Async loading layer with request coalescing.

use std::convert::Infallible;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use memocache_core::time::{Clock, SystemClock};
use memocache_core::Result;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// TTL cache for values produced by async functions, with stampede
/// protection.
///
/// Concurrent misses for the same key coalesce: the first caller runs its
/// producer while later callers wait on a per-key lock, then re-check the
/// store and hit without producing. If the first producer fails, nothing is
/// stored and the next waiter runs its own producer, so one failure neither
/// poisons the slot nor fails every waiter.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use memocache::LoadingCache;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache: LoadingCache<u64, String> = LoadingCache::new();
/// let user = cache
///     .get_with(1, Duration::from_secs(60), || async { "alice".to_string() })
///     .await;
/// assert_eq!(user, "alice");
/// # }
/// ```
pub struct LoadingCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    inner: TtlCache<K, V, C>,
    /// Per-key gates for in-flight producers. An entry is removed once its
    /// producer settles; stragglers still holding the old gate stay correct,
    /// they just stop coalescing with callers that arrive later.
    in_flight: DashMap<K, Arc<Mutex<()>>>,
}

impl<K, V> LoadingCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with the default configuration and system clock.
    pub fn new() -> Self {
        Self {
            inner: TtlCache::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Creates a cache with a custom configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> LoadingCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache with a custom clock (useful for testing).
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        Ok(Self {
            inner: TtlCache::with_clock(config, clock)?,
            in_flight: DashMap::new(),
        })
    }

    /// Returns the cached value for `key`, or awaits `producer` and caches
    /// its result for `ttl`.
    pub async fn get_with<F, Fut>(&self, key: K, ttl: Duration, producer: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let result = self
            .try_get_with(key, ttl, || async move { Ok::<_, Infallible>(producer().await) })
            .await;
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_with`](Self::get_with).
    ///
    /// On producer error nothing is stored and the error propagates to this
    /// caller only.
    #[instrument(skip_all)]
    pub async fn try_get_with<F, Fut, E>(
        &self,
        key: K,
        ttl: Duration,
        producer: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.inner.get(&key) {
            return Ok(value);
        }

        // Take the per-key gate. The guard must not be held across the
        // DashMap shard lock, hence the scoped clone.
        let gate = {
            let entry = self.in_flight.entry(key.clone()).or_default();
            Arc::clone(entry.value())
        };
        let guard = gate.lock().await;

        // A caller that held the gate before us may have filled the slot.
        if let Some(value) = self.inner.get(&key) {
            return Ok(value);
        }

        debug!("running producer for cold key");
        let result = producer().await;
        if let Ok(value) = &result {
            self.inner.insert_with_ttl(key.clone(), value.clone(), ttl);
        }

        drop(guard);
        self.in_flight.remove(&key);
        result
    }

    /// Removes the entry for `key`, returning its value if one was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    /// Removes all entries unconditionally.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        self.inner.cleanup_expired()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }
}

impl<K, V> Default for LoadingCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
