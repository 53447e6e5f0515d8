//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key stability, TTL expiry, and the capacity bound.

use std::collections::HashSet;
use std::time::Duration;

use bytes::Bytes;
use proptest::prelude::*;

use crate::cache::{cache_key, ArtifactCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(3600);

// == Strategies ==
fn source_strategy() -> impl Strategy<Value = String> {
    "\\\\[a-z]{1,12}\\{[ -~]{0,64}\\}"
}

fn engine_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("pdflatex"), Just("xelatex"), Just("lualatex")]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Same source and engine always hash to the same key
    #[test]
    fn prop_key_deterministic(source in source_strategy(), engine in engine_strategy()) {
        prop_assert_eq!(cache_key(&source, engine), cache_key(&source, engine));
    }

    // Distinct sources with the same engine never share a key
    #[test]
    fn prop_key_distinguishes_sources(
        a in source_strategy(),
        b in source_strategy(),
        engine in engine_strategy()
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(cache_key(&a, engine), cache_key(&b, engine));
    }

    // Changing only the engine changes the key
    #[test]
    fn prop_key_distinguishes_engines(source in source_strategy()) {
        let keys: HashSet<String> = ["pdflatex", "xelatex", "lualatex"]
            .iter()
            .map(|engine| cache_key(&source, engine))
            .collect();
        prop_assert_eq!(keys.len(), 3);
    }

    // Inserting past capacity never lets the store exceed it
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec("[a-f0-9]{8}", 1..300),
        max_entries in 1usize..60
    ) {
        let mut store = ArtifactCache::new(max_entries, TEST_TTL);

        for (i, key) in keys.into_iter().enumerate() {
            store.put_at(key, Bytes::from_static(b"%PDF"), i as u64);
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }

    // The newest insert always survives eviction, the oldest goes first
    #[test]
    fn prop_eviction_removes_oldest(count in 2usize..80, max_entries in 2usize..40) {
        let mut store = ArtifactCache::new(max_entries, TEST_TTL);
        for i in 0..count {
            store.put_at(format!("k{i}"), Bytes::from_static(b"%PDF"), i as u64);
        }

        let last = format!("k{}", count - 1);
        prop_assert!(store.contains(&last));
        if count > max_entries {
            prop_assert!(!store.contains("k0"));
        }
    }

    // Servable one millisecond before the TTL, gone one millisecond after
    #[test]
    fn prop_ttl_boundary(inserted_at in 0u64..1_000_000_000, ttl_secs in 1u64..100_000) {
        let ttl = Duration::from_secs(ttl_secs);
        let ttl_ms = ttl_secs * 1000;
        let mut store = ArtifactCache::new(10, ttl);
        store.put_at("k".to_string(), Bytes::from_static(b"%PDF"), inserted_at);

        prop_assert!(store.get_at("k", inserted_at + ttl_ms - 1).is_some());
        prop_assert!(store.get_at("k", inserted_at + ttl_ms + 1).is_none());
    }
}
