//! Cache Store Module
//!
//! Keyed artifact storage with TTL expiry checked on read and oldest-first
//! batch eviction on write.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::cache::{
    current_timestamp_ms, eviction_batch_size, oldest_keys, CacheEntry, CacheStats,
    CLIENT_CACHE_MAX_ENTRIES, CLIENT_CACHE_TTL, EVICTION_FRACTION, SERVER_CACHE_MAX_ENTRIES,
    SERVER_CACHE_TTL,
};

// == Artifact Cache ==
/// Content-addressed store of compiled artifacts.
///
/// Expired entries are never served. They are purged lazily on read or in
/// bulk by [`ArtifactCache::purge_expired`].
#[derive(Debug)]
pub struct ArtifactCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// How long an entry stays servable
    ttl: Duration,
}

impl ArtifactCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl` - Lifetime of each entry from the moment it is stored
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    /// Cache sized for the compile server (1 hour, 100 entries).
    pub fn server_default() -> Self {
        Self::new(SERVER_CACHE_MAX_ENTRIES, SERVER_CACHE_TTL)
    }

    /// Cache sized for a preview session (10 minutes, 50 entries).
    pub fn client_default() -> Self {
        Self::new(CLIENT_CACHE_MAX_ENTRIES, CLIENT_CACHE_TTL)
    }

    // == Get ==
    /// Looks up an artifact using the wall clock.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Looks up an artifact as of `now_ms`.
    ///
    /// A present but expired entry counts as a miss and is removed.
    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<Bytes> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms, self.ttl) => {
                let artifact = entry.artifact.clone();
                self.stats.record_hit();
                return Some(artifact);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Put ==
    /// Stores an artifact stamped with the wall clock.
    pub fn put(&mut self, key: String, artifact: Bytes) {
        self.put_at(key, artifact, current_timestamp_ms());
    }

    /// Stores an artifact stamped with `now_ms`.
    ///
    /// Inserting a new key into a full store first evicts the oldest
    /// [`EVICTION_FRACTION`] of entries. Overwriting an existing key never
    /// evicts.
    pub fn put_at(&mut self, key: String, artifact: Bytes, now_ms: u64) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict();
        }

        self.entries.insert(key, CacheEntry::new(artifact, now_ms));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Drops the oldest batch of entries. Returns how many were removed.
    pub fn evict(&mut self) -> usize {
        let count = eviction_batch_size(self.entries.len(), self.max_entries, EVICTION_FRACTION);
        let victims = oldest_keys(&self.entries, count);
        for key in &victims {
            self.entries.remove(key);
        }

        let removed = victims.len();
        if removed > 0 {
            debug!(
                "Evicted {} oldest cache entries ({} remaining)",
                removed,
                self.entries.len()
            );
        }
        self.stats.record_evictions(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries as of `now_ms`. Returns the number removed.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired_at(now_ms, ttl));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Removes all expired entries using the wall clock.
    pub fn cleanup_expired(&mut self) -> usize {
        self.purge_expired(current_timestamp_ms())
    }

    // == Clear ==
    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
