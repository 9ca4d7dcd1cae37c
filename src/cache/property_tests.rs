//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, recency and removal behavior against a
//! simple reference model.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::cache::CacheStore;

// == Strategies ==
/// Generates cache keys from a small alphabet so sequences revisit keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn unique_keys_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z0-9_]{1,16}", min..max)
        .prop_map(|keys| keys.into_iter().collect())
}

/// A sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: u32 },
    Get { key: String },
    Remove { key: String },
    Clear,
    SetCapacity { capacity: usize },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
        1 => (0usize..8).prop_map(|capacity| CacheOp::SetCapacity { capacity }),
    ]
}

// == Reference Model ==
/// Vec-backed LRU, front = most recently used. Slow but obviously correct.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(String, u32)>,
    capacity: usize,
}

impl Model {
    fn add(&mut self, key: String, value: u32) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return;
        }
        self.entries.insert(0, (key, value));
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1;
        self.entries.insert(0, entry);
        Some(value)
    }

    fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any operation sequence leaves the store matching the reference model in
    // both contents and recency order.
    #[test]
    fn prop_matches_reference_model(
        capacity in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(capacity);
        let mut model = Model { capacity, ..Model::default() };

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.add(key.clone(), value);
                    model.add(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key).copied();
                    prop_assert_eq!(got, model.get(&key), "get({}) diverged", key);
                }
                CacheOp::Remove { key } => {
                    store.remove(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.entries.clear();
                }
                CacheOp::SetCapacity { capacity } => {
                    store.set_capacity(capacity);
                    model.set_capacity(capacity);
                }
            }

            store.assert_consistent();
            prop_assert_eq!(store.keys(), model.keys());
        }
    }

    // The number of entries never exceeds capacity after any insertion.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        entries in prop::collection::vec((key_strategy(), any::<u32>()), 1..200)
    ) {
        let mut store = CacheStore::new(capacity);

        for (key, value) in entries {
            store.add(key, value);
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // Filling to capacity and adding one more evicts the first-inserted key.
    #[test]
    fn prop_lru_eviction_order(
        keys in unique_keys_strategy(2, 10),
        new_key in "[A-Z]{1,8}"
    ) {
        let capacity = keys.len();
        let mut store = CacheStore::new(capacity);

        for key in &keys {
            store.add(key.clone(), format!("value_{}", key));
        }
        prop_assert_eq!(store.len(), capacity);

        store.add(new_key.clone(), "new".to_string());

        prop_assert_eq!(store.len(), capacity);
        prop_assert!(store.get(&keys[0]).is_none(), "Oldest key should have been evicted");
        prop_assert!(store.get(&new_key).is_some());
        for key in keys.iter().skip(1) {
            prop_assert!(store.get(key).is_some(), "Key '{}' should still exist", key);
        }
    }

    // A get on the oldest key protects it; the second-oldest is evicted instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in unique_keys_strategy(3, 8),
        new_key in "[A-Z]{1,8}"
    ) {
        let capacity = keys.len();
        let mut store = CacheStore::new(capacity);

        for key in &keys {
            store.add(key.clone(), format!("value_{}", key));
        }

        prop_assert!(store.get(&keys[0]).is_some());
        store.add(new_key, "new".to_string());

        prop_assert!(store.get(&keys[0]).is_some(), "Accessed key should survive");
        prop_assert!(store.get(&keys[1]).is_none(), "Second-oldest key should be evicted");
    }

    // Overwriting keeps a single entry holding the latest value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in any::<u32>(),
        value2 in any::<u32>()
    ) {
        let mut store = CacheStore::new(4);

        store.add(key.clone(), value1);
        store.add(key.clone(), value2);

        prop_assert_eq!(store.get(&key).copied(), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Removing twice has the same effect as removing once.
    #[test]
    fn prop_removal_idempotence(keys in unique_keys_strategy(1, 10), victim in 0usize..10) {
        let mut once = CacheStore::new(16);
        let mut twice = CacheStore::new(16);
        for key in &keys {
            once.add(key.clone(), key.len());
            twice.add(key.clone(), key.len());
        }

        let victim = &keys[victim % keys.len()];
        once.remove(victim);
        twice.remove(victim);
        twice.remove(victim);

        prop_assert_eq!(once.keys(), twice.keys());
        prop_assert!(!twice.contains_key(victim));
    }

    // After clear nothing is found and a refill to capacity evicts nothing.
    #[test]
    fn prop_clear_completeness(keys in unique_keys_strategy(1, 12)) {
        let capacity = keys.len();
        let mut store = CacheStore::new(capacity);
        for key in &keys {
            store.add(key.clone(), 0u8);
        }

        store.clear();
        for key in &keys {
            prop_assert!(store.get(key).is_none());
        }

        for key in &keys {
            store.add(key.clone(), 1u8);
        }
        let found: HashSet<String> = store.keys().into_iter().collect();
        prop_assert_eq!(found.len(), capacity);
        prop_assert_eq!(store.capacity(), capacity);
    }

    // An entry with a TTL is served strictly before the deadline and gone at it.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        ttl_ms in 1u64..10_000,
        before_ms in 0u64..10_000
    ) {
        let mut store = CacheStore::new(4);
        let start = Instant::now();
        let ttl = Duration::from_millis(ttl_ms);

        store.insert_at(key.clone(), 7u32, ttl, start);

        let checked_at = start + Duration::from_millis(before_ms % ttl_ms);
        prop_assert_eq!(store.get_at(&key, checked_at).copied(), Some(7));
        prop_assert_eq!(store.get_at(&key, start + ttl).copied(), None);
        prop_assert!(store.is_empty());
    }

    // Zero-TTL entries never expire, however far the clock moves.
    #[test]
    fn prop_zero_ttl_permanence(key in key_strategy(), later_secs in 0u64..1_000_000) {
        let mut store = CacheStore::new(4);
        let start = Instant::now();

        store.insert_at(key.clone(), 1u32, Duration::ZERO, start);

        let later = start + Duration::from_secs(later_secs);
        prop_assert_eq!(store.get_at(&key, later).copied(), Some(1));
    }
}
