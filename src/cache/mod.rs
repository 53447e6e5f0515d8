//! Cache Module
//!
//! Content-addressed PDF artifact cache with TTL expiry and batch eviction.
//! The server tier and the client preview tier are two instances of the same
//! [`ArtifactCache`], differing only in TTL and capacity.

mod entry;
mod eviction;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use eviction::{eviction_batch_size, oldest_keys};
pub use key::cache_key;
pub use stats::CacheStats;
pub use store::ArtifactCache;

// == Public Constants ==
/// Server tier: how long a compiled PDF stays servable
pub const SERVER_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Server tier: maximum number of cached artifacts
pub const SERVER_CACHE_MAX_ENTRIES: usize = 100;

/// Client tier: how long a fetched PDF stays servable
pub const CLIENT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Client tier: maximum number of cached artifacts
pub const CLIENT_CACHE_MAX_ENTRIES: usize = 50;

/// Share of entries dropped in one eviction pass
pub const EVICTION_FRACTION: f64 = 0.2;
