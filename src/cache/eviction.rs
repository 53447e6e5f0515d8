//! Eviction Module
//!
//! Batch eviction by creation time. When a cache fills up, the oldest share
//! of its entries is dropped in one pass instead of one entry per insert.

use std::collections::HashMap;

use super::CacheEntry;

// == Batch Size ==
/// Number of entries to drop so that one more insert fits.
///
/// At least `ceil(len * fraction)`, and never fewer than needed to bring the
/// store below `max_entries`.
pub fn eviction_batch_size(len: usize, max_entries: usize, fraction: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let share = ((len as f64) * fraction).ceil() as usize;
    let overflow = (len + 1).saturating_sub(max_entries);
    share.max(overflow).max(1).min(len)
}

// == Oldest Keys ==
/// Returns up to `count` keys ordered oldest first.
///
/// Ties on timestamp are broken by key so the selection is deterministic.
pub fn oldest_keys(entries: &HashMap<String, CacheEntry>, count: usize) -> Vec<String> {
    let mut by_age: Vec<(&String, u64)> = entries
        .iter()
        .map(|(key, entry)| (key, entry.created_at))
        .collect();
    by_age.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    by_age
        .into_iter()
        .take(count)
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entries(stamps: &[(&str, u64)]) -> HashMap<String, CacheEntry> {
        stamps
            .iter()
            .map(|(k, t)| (k.to_string(), CacheEntry::new(Bytes::new(), *t)))
            .collect()
    }

    #[test]
    fn test_batch_size_default_capacity() {
        assert_eq!(eviction_batch_size(100, 100, 0.2), 20);
    }

    #[test]
    fn test_batch_size_small_store_evicts_at_least_one() {
        assert_eq!(eviction_batch_size(3, 3, 0.2), 1);
        assert_eq!(eviction_batch_size(1, 1, 0.2), 1);
    }

    #[test]
    fn test_batch_size_over_capacity_catches_up() {
        // Shrunk capacity: 50 entries with room for 10
        assert_eq!(eviction_batch_size(50, 10, 0.2), 41);
    }

    #[test]
    fn test_batch_size_empty() {
        assert_eq!(eviction_batch_size(0, 10, 0.2), 0);
    }

    #[test]
    fn test_oldest_keys_order() {
        let map = entries(&[("c", 30), ("a", 10), ("b", 20), ("d", 40)]);
        assert_eq!(oldest_keys(&map, 2), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_oldest_keys_tie_break() {
        let map = entries(&[("y", 5), ("x", 5), ("z", 1)]);
        assert_eq!(oldest_keys(&map, 3), vec!["z", "x", "y"]);
    }
}
