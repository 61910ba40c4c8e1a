//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the eviction and expiry correctness properties
//! of both engines.

use proptest::prelude::*;
use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{LruCache, TtlCache};

// == Test Configuration ==
const TEST_CAPACITY: usize = 50;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the LRU entry count never exceeds
    // the configured capacity, and no operation leaves the cache unusable.
    #[test]
    fn prop_lru_capacity_invariant(ops in prop::collection::vec(cache_op_strategy(), 1..200)) {
        let capacity = 10;
        let mut cache = LruCache::new(capacity).unwrap();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Delete { key } => {
                    let _ = cache.delete(&key);
                }
            }
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // For any key-value pair, storing then retrieving returns the exact
    // value that was stored, in both engines.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut lru = LruCache::new(TEST_CAPACITY).unwrap();
        lru.set(key.clone(), value.clone());
        prop_assert_eq!(lru.get(&key).unwrap(), value.clone());

        let mut ttl = TtlCache::new(TEST_TTL).unwrap();
        ttl.set(key.clone(), value.clone());
        prop_assert_eq!(ttl.get(&key).unwrap(), value);
    }

    // For any existing key, a delete makes a subsequent get miss.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut lru = LruCache::new(TEST_CAPACITY).unwrap();
        lru.set(key.clone(), value.clone());
        lru.delete(&key).unwrap();
        prop_assert!(lru.get(&key).is_err());

        let mut ttl = TtlCache::new(TEST_TTL).unwrap();
        ttl.set(key.clone(), value);
        ttl.delete(&key).unwrap();
        prop_assert!(ttl.get(&key).is_err());
    }

    // For any key, storing V1 then V2 yields V2 on get and exactly one
    // entry, in both engines.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut lru = LruCache::new(TEST_CAPACITY).unwrap();
        lru.set(key.clone(), value1.clone());
        lru.set(key.clone(), value2.clone());
        prop_assert_eq!(lru.get(&key).unwrap(), value2.clone());
        prop_assert_eq!(lru.len(), 1);

        let mut ttl = TtlCache::new(TEST_TTL).unwrap();
        ttl.set(key.clone(), value1);
        ttl.set(key.clone(), value2.clone());
        prop_assert_eq!(ttl.get(&key).unwrap(), value2);
        prop_assert_eq!(ttl.len(), 1);
    }

    // For any set of distinct keys filling the cache, inserting one more
    // evicts exactly the least recently used key.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(key_strategy(), 3..10),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut cache = LruCache::new(capacity).unwrap();

        // First key inserted becomes the eviction candidate
        let oldest_key = unique_keys[0].clone();
        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key));
        }
        prop_assert_eq!(cache.len(), capacity);

        cache.set(new_key.clone(), new_value);

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&oldest_key), "Oldest key should be evicted");
        prop_assert!(cache.contains(&new_key));
        for key in unique_keys.iter().skip(1) {
            prop_assert!(cache.contains(key), "Key '{}' should survive", key);
        }
    }

    // For any full cache, reading a key protects it from the next
    // eviction.
    #[test]
    fn prop_lru_read_refreshes_recency(
        keys in prop::collection::vec(key_strategy(), 3..8),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = keys
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut cache = LruCache::new(capacity).unwrap();

        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key));
        }

        // Refresh the would-be victim, making the second key the victim
        let refreshed = unique_keys[0].clone();
        cache.get(&refreshed).unwrap();
        cache.set(new_key.clone(), new_value);

        prop_assert!(cache.contains(&refreshed), "Refreshed key must survive");
        prop_assert!(!cache.contains(&unique_keys[1]), "Second-oldest key is evicted");
        prop_assert!(cache.contains(&new_key));
    }

    // Every key yielded by keys() is a key contains() accepts, for both
    // engines.
    #[test]
    fn prop_iteration_consistency(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..40)
    ) {
        let mut lru = LruCache::new(10).unwrap();
        let mut ttl = TtlCache::new(TEST_TTL).unwrap();
        for (key, value) in entries {
            lru.set(key.clone(), value.clone());
            ttl.set(key, value);
        }

        let lru_keys: Vec<String> = lru.keys().cloned().collect();
        for key in lru_keys {
            prop_assert!(lru.contains(&key));
        }

        let ttl_keys: Vec<String> = ttl.keys().cloned().collect();
        for key in ttl_keys {
            prop_assert!(ttl.contains(&key));
        }
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // For any entry, the TTL engine serves it before its lifetime elapses
    // and misses afterwards, without any explicit removal.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let mut cache = TtlCache::new(Duration::from_millis(100)).unwrap();

        cache.set(key.clone(), value.clone());
        prop_assert_eq!(cache.get(&key).unwrap(), value);

        // Wait past the deadline with a margin for timing jitter
        sleep(Duration::from_millis(150));

        prop_assert!(cache.get(&key).is_err(), "Entry should expire");
        prop_assert_eq!(cache.len(), 0);
    }
}
