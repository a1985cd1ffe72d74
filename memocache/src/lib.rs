//! # memocache
//!
//! Generic in-memory TTL cache with lazy expiry.
//!
//! Two flavors share one store model:
//!
//! - [`TtlCache`]: synchronous keyed lookup with lazy population. Staleness
//!   is checked on access only; there is no background timer.
//! - [`LoadingCache`]: async producers with request coalescing, so a burst
//!   of concurrent misses for one key runs a single producer.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use memocache::TtlCache;
//!
//! let cache: TtlCache<u64, String> = TtlCache::new();
//!
//! // Miss: the producer runs and its result is cached for 60 seconds.
//! let name = cache.get_or_insert_with(1, Duration::from_secs(60), || "alice".to_string());
//! assert_eq!(name, "alice");
//!
//! // Hit: the second producer is never invoked.
//! let name = cache.get_or_insert_with(1, Duration::from_secs(60), || "bob".to_string());
//! assert_eq!(name, "alice");
//! ```

pub mod cache;
pub mod config;
mod entry;
pub mod loader;
pub mod stats;

pub use cache::TtlCache;
pub use config::CacheConfig;
pub use loader::LoadingCache;
pub use stats::CacheStats;

pub use memocache_core::{CacheError, Clock, ManualClock, Result, SystemClock};
