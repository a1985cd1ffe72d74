//! Error types for memocache.
//!
//! Producer failures are deliberately not represented here: the `try_*`
//! operations are generic over the caller's error type and propagate it
//! untouched, so a failed fetch can never be wrapped, retried, or cached.

use thiserror::Error;

/// Result type alias using `CacheError`.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Main error type for memocache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Configuration rejected before the cache was built.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
