//! Cache entry bookkeeping.

use std::time::{Duration, Instant};

/// A stored value together with its expiry window.
///
/// Staleness is derived from `inserted_at + ttl` rather than a stored
/// deadline, which sidesteps `Instant` overflow for very large TTLs.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry<V> {
    pub(crate) value: V,
    pub(crate) inserted_at: Instant,
    pub(crate) ttl: Duration,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, inserted_at: Instant, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at,
            ttl,
        }
    }

    /// An entry is fresh strictly before `inserted_at + ttl`.
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_within_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now, Duration::from_secs(10));

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_secs(9)));
    }

    #[test]
    fn test_stale_exactly_at_deadline() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now, Duration::from_secs(10));

        assert!(entry.is_expired(now + Duration::from_secs(10)));
        assert!(entry.is_expired(now + Duration::from_secs(11)));
    }

    #[test]
    fn test_zero_ttl_is_always_stale() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u32, now, Duration::ZERO);

        assert!(entry.is_expired(now));
    }
}
