//! In-memory TTL cache with lazy expiry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use memocache_core::time::{Clock, SystemClock};
use memocache_core::Result;

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::stats::CacheStats;

/// Generic in-memory cache with per-entry TTL.
///
/// Thread-safe; staleness is checked only on access (no background timer).
/// An expired entry is treated as absent and stays in the store until it is
/// overwritten, swept by [`cleanup_expired`](Self::cleanup_expired), or
/// evicted by a write at capacity.
///
/// Concurrent misses for the same key may each run their producer; the later
/// write-back wins. Callers that need misses to coalesce should use
/// [`LoadingCache`](crate::LoadingCache) instead.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use memocache::TtlCache;
///
/// let cache: TtlCache<String, u32> = TtlCache::new();
/// let value = cache.get_or_insert_with("answer".to_string(), Duration::from_secs(60), || 42);
/// assert_eq!(value, 42);
/// assert_eq!(cache.get(&"answer".to_string()), Some(42));
/// ```
pub struct TtlCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    config: CacheConfig,
    clock: C,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with the default configuration and system clock.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config: CacheConfig::default(),
            clock: SystemClock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache with a custom configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache with a custom clock (useful for testing).
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: RwLock::new(HashMap::with_capacity(config.max_entries.min(1024))),
            config,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` if the key is absent or its entry has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("cache hit");
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!("cache miss");
                None
            }
        }
    }

    /// Returns the cached value for `key`, or runs `producer` and caches its
    /// result for `ttl`.
    ///
    /// The producer is skipped entirely on a hit. A zero TTL means "never
    /// cached": the producer runs and nothing is stored.
    pub fn get_or_insert_with<F>(&self, key: K, ttl: Duration, producer: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = producer();
        self.insert_with_ttl(key, value.clone(), ttl);
        value
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// On producer error nothing is stored and the error propagates, so a
    /// failed fetch never poisons the slot: the next call runs its producer
    /// again.
    pub fn try_get_or_insert_with<F, E>(&self, key: K, ttl: Duration, producer: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = producer()?;
        self.insert_with_ttl(key, value.clone(), ttl);
        Ok(value)
    }

    /// Caches a value with the default TTL from the configuration.
    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.config.default_ttl_duration());
    }

    /// Caches a value with a custom TTL, replacing any previous entry.
    ///
    /// A zero TTL stores nothing. At capacity, expired entries are swept
    /// first (when `auto_cleanup` is set), then the oldest entry is evicted.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        if ttl.is_zero() {
            trace!("zero ttl, skipping write-back");
            return;
        }

        let now = self.clock.now();
        let mut entries = self.entries.write();

        if entries.len() >= self.config.max_entries && !entries.contains_key(&key) {
            if self.config.auto_cleanup {
                entries.retain(|_, e| !e.is_expired(now));
            }
            if entries.len() >= self.config.max_entries {
                if let Some(oldest_key) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest_key);
                    debug!(len = entries.len(), "evicted oldest entry at capacity");
                }
            }
        }

        entries.insert(key, CacheEntry::new(value, now, ttl));
    }

    /// Removes the entry for `key`, returning its value if one was present.
    ///
    /// An expired entry is still returned here; it only stops being visible
    /// through [`get`](Self::get).
    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().remove(key).map(|e| e.value)
    }

    /// Removes all entries unconditionally.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "swept expired entries");
        }
        removed
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            capacity: self.config.max_entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for TtlCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
