//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use memocache_core::{CacheError, Result};

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Default TTL in seconds, used by writes that don't name one
    pub default_ttl_seconds: u64,
    /// Whether to sweep expired entries before evicting at capacity
    pub auto_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl_seconds: 3600, // 1 hour
            auto_cleanup: true,
        }
    }
}

impl CacheConfig {
    /// Creates a config bounded at `max_entries`.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Default::default()
        }
    }

    /// Sets the default TTL. Sub-second precision is truncated.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_seconds = ttl.as_secs();
        self
    }

    /// Disables the expired-entry sweep on writes at capacity.
    pub fn no_auto_cleanup(mut self) -> Self {
        self.auto_cleanup = false;
        self
    }

    /// The default TTL as a `Duration`.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Rejects configurations the cache cannot operate with.
    ///
    /// A zero capacity would make every write evict itself.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl_seconds, 3600);
        assert!(config.auto_cleanup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::with_capacity(10)
            .default_ttl(Duration::from_secs(120))
            .no_auto_cleanup();

        assert_eq!(config.max_entries, 10);
        assert_eq!(config.default_ttl_duration(), Duration::from_secs(120));
        assert!(!config.auto_cleanup);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig::with_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = CacheConfig::with_capacity(42).default_ttl(Duration::from_secs(5));

        let json = serde_json::to_string(&config).unwrap();
        let back: CacheConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.max_entries, 42);
        assert_eq!(back.default_ttl_seconds, 5);
    }
}
