//! Cache statistics.

/// Point-in-time snapshot of a cache's contents and counters.
///
/// Expired entries still occupy the store until a write at capacity, an
/// explicit [`cleanup_expired`](crate::TtlCache::cleanup_expired), or
/// removal; the snapshot makes that visible.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that found no fresh entry
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the store, in `[0.0, 1.0]`.
    ///
    /// Returns 0.0 before any lookup has happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            total_entries: 2,
            expired_entries: 0,
            valid_entries: 2,
            capacity: 100,
            hits: 3,
            misses: 1,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats {
            total_entries: 0,
            expired_entries: 0,
            valid_entries: 0,
            capacity: 100,
            hits: 0,
            misses: 0,
        };
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
