//! # memocache core
//!
//! Errors and the time abstraction shared by the memocache crates.
//!
//! This crate provides the building blocks the cache itself is written
//! against:
//!
//! - **Errors**: the [`CacheError`] type and a crate-wide [`Result`] alias
//! - **Time**: the [`Clock`] trait, so expiry can be driven by the system
//!   clock in production and a manual clock in tests
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use memocache_core::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let before = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now() - before, Duration::from_secs(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod time;

// Re-export commonly used items at crate root
pub use error::{CacheError, Result};
pub use time::{Clock, ManualClock, SystemClock};
