//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::CacheError;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    SetExpired { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        1 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::SetExpired { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

/// Expected state of one key in the model: the value and whether it expired
type Model = HashMap<String, (String, bool)>;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back returns the exact value stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let store: Cache<String, String> = Cache::new();

        store.set(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Ok(value));
    }

    // After a delete, lookups miss and the size drops by exactly one.
    #[test]
    fn prop_delete_removes_entry(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..20),
    ) {
        let store: Cache<String, String> = Cache::new();
        for (key, value) in &entries {
            store.set(key.clone(), value.clone());
        }

        for (deleted, key) in entries.keys().enumerate() {
            store.delete(key);
            prop_assert_eq!(store.get(key), Err(CacheError::NotFound));
            prop_assert_eq!(store.size(), entries.len() - deleted - 1);
        }
    }

    // The last write to a key wins and occupies a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store: Cache<String, String> = Cache::new();

        store.set(key.clone(), value1);
        store.set(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Ok(value2));
        prop_assert_eq!(store.size(), 1, "Should have exactly one entry after overwrite");
    }

    // Any operation sequence leaves the cache agreeing with the model, and
    // the pool never grows past its capacity.
    #[test]
    fn prop_matches_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
        max_pool_size in 0usize..4,
    ) {
        let store: Cache<String, String> =
            Cache::with_config(CacheConfig::new().max_pool_size(max_pool_size));
        let mut model = Model::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.insert(key, (value, false));
                }
                CacheOp::SetExpired { key, value } => {
                    store.set_with_expiration(key.clone(), value.clone(), Duration::ZERO);
                    model.insert(key, (value, true));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.exists(&key), model.contains_key(&key));
                    match model.get(&key).cloned() {
                        Some((value, false)) => {
                            prop_assert_eq!(store.get(&key), Ok(value));
                        }
                        Some((_, true)) => {
                            prop_assert_eq!(store.get(&key), Err(CacheError::NotFound));
                            model.remove(&key);
                        }
                        None => {
                            prop_assert_eq!(store.get(&key), Err(CacheError::NotFound));
                        }
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(store.size(), model.len());
            prop_assert!(
                store.pool_size() <= max_pool_size,
                "Pool size {} exceeds max {}",
                store.pool_size(),
                max_pool_size
            );
        }
    }

    // Hit, miss and expiration counters follow the model: a live entry is a
    // hit, every other lookup a miss, and each expired entry read is evicted.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let store: Cache<String, String> = Cache::new();
        let mut model = Model::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_expirations: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.insert(key, (value, false));
                }
                CacheOp::SetExpired { key, value } => {
                    store.set_with_expiration(key.clone(), value.clone(), Duration::ZERO);
                    model.insert(key, (value, true));
                }
                CacheOp::Get { key } => {
                    let _ = store.get(&key);
                    match model.get(&key) {
                        Some((_, false)) => expected_hits += 1,
                        Some((_, true)) => {
                            expected_misses += 1;
                            expected_expirations += 1;
                            model.remove(&key);
                        }
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.expirations, expected_expirations, "Expirations mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
        prop_assert_eq!(stats.pool_size, store.pool_size(), "Pool size mismatch");
    }
}
