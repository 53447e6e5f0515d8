//! Cache Entry Module
//!
//! A compiled artifact plus the time it was stored.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;

// == Cache Entry ==
/// A single cached PDF artifact.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Compiled PDF bytes
    pub artifact: Bytes,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the given time.
    pub fn new(artifact: Bytes, created_at: u64) -> Self {
        Self {
            artifact,
            created_at,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored, saturating at zero
    /// if the clock moved backwards.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is past its TTL.
    ///
    /// An entry is valid only while `now - created_at < ttl`, so it expires
    /// the moment its age reaches the TTL.
    pub fn is_expired_at(&self, now_ms: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) >= ttl.as_millis()
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64, ttl: Duration) -> u64 {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
