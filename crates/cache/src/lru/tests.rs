//! Tests for the bounded LRU cache

use super::*;
use proptest::prelude::*;

fn abc_cache() -> BoundedCache<&'static str, i32> {
    let mut cache = BoundedCache::new(3).unwrap();
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    cache
}

#[test]
fn test_zero_capacity_is_rejected() {
    let result = BoundedCache::<String, i32>::new(0);
    assert!(matches!(result, Err(Error::InvalidCapacity { capacity: 0 })));
}

#[test]
fn test_get_promotes_before_eviction() {
    let mut cache = abc_cache();

    assert_eq!(cache.get("a"), Some(&1));
    let evicted = cache.set("d", 4);

    assert_eq!(evicted, Some(("b", 2)));
    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(&1));
    assert_eq!(cache.get("c"), Some(&3));
    assert_eq!(cache.get("d"), Some(&4));
    assert_eq!(cache.size(), 3);
}

#[test]
fn test_update_in_place_does_not_evict() {
    let mut cache = abc_cache();

    assert_eq!(cache.set("a", 10), None);

    assert_eq!(cache.size(), 3);
    assert!(cache.has("a") && cache.has("b") && cache.has("c"));
    assert_eq!(cache.peek("a"), Some(&10));
    // "a" is now the hottest entry, "b" the coldest
    assert_eq!(cache.keys_by_recency(), vec![&"a", &"c", &"b"]);
}

#[test]
fn test_has_and_peek_leave_recency_alone() {
    let mut cache = abc_cache();

    assert!(cache.has("a"));
    assert_eq!(cache.peek("a"), Some(&1));
    cache.set("d", 4);

    assert!(!cache.has("a"));
}

#[test]
fn test_miss_has_no_side_effect() {
    let mut cache = abc_cache();
    let before: Vec<&str> = cache.keys_by_recency().into_iter().copied().collect();

    assert_eq!(cache.get("zzz"), None);

    let after: Vec<&str> = cache.keys_by_recency().into_iter().copied().collect();
    assert_eq!(before, after);
}

#[test]
fn test_delete_unlinks_entry() {
    let mut cache = abc_cache();

    assert!(cache.delete("b"));
    assert!(!cache.delete("b"));
    assert_eq!(cache.size(), 2);
    assert_eq!(cache.keys_by_recency(), vec![&"c", &"a"]);

    // Freed slot is reused and nothing is evicted while below capacity
    assert_eq!(cache.set("d", 4), None);
    assert_eq!(cache.size(), 3);
    assert_eq!(cache.set("e", 5), Some(("a", 1)));
}

#[test]
fn test_clear_resets_everything() {
    let mut cache = abc_cache();

    cache.clear();

    assert_eq!(cache.size(), 0);
    assert!(cache.is_empty());
    assert!(cache.keys_by_recency().is_empty());
    assert_eq!(cache.capacity(), 3);

    cache.set("x", 9);
    assert_eq!(cache.get("x"), Some(&9));
}

#[test]
fn test_capacity_one() {
    let mut cache = BoundedCache::new(1).unwrap();
    cache.set("a".to_string(), 1);
    let evicted = cache.set("b".to_string(), 2);

    assert_eq!(evicted, Some(("a".to_string(), 1)));
    assert_eq!(cache.get("b"), Some(&2));
    assert_eq!(cache.size(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Set(u8, u32),
    Delete(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Get),
        (0u8..12, any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        (0u8..12).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn prop_size_never_exceeds_capacity(
        capacity in 1usize..8,
        keys in proptest::collection::vec(0u16..64, 0..200),
    ) {
        let mut cache = BoundedCache::new(capacity).unwrap();
        for key in keys {
            cache.set(key, ());
            prop_assert!(cache.size() <= capacity);
        }
    }

    #[test]
    fn prop_most_recent_distinct_keys_survive(capacity in 1usize..8, extra in 1usize..8) {
        let mut cache = BoundedCache::new(capacity).unwrap();
        let total = capacity + extra;
        for key in 0..total {
            cache.set(key, key);
        }

        prop_assert_eq!(cache.size(), capacity);
        for key in 0..extra {
            prop_assert!(!cache.has(&key));
        }
        for key in extra..total {
            prop_assert!(cache.has(&key));
        }
    }

    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in proptest::collection::vec(op_strategy(), 0..150),
    ) {
        let mut cache = BoundedCache::new(capacity).unwrap();
        // Reference model: hottest entry first
        let mut model: Vec<(u8, u32)> = Vec::new();

        for op in ops {
            match op {
                Op::Get(k) => {
                    let found = model.iter().position(|(mk, _)| *mk == k);
                    let expected = found.map(|pos| {
                        let entry = model.remove(pos);
                        model.insert(0, entry);
                        entry.1
                    });
                    prop_assert_eq!(cache.get(&k).copied(), expected);
                }
                Op::Set(k, v) => {
                    if let Some(pos) = model.iter().position(|(mk, _)| *mk == k) {
                        model.remove(pos);
                    } else if model.len() == capacity {
                        model.pop();
                    }
                    model.insert(0, (k, v));
                    cache.set(k, v);
                }
                Op::Delete(k) => {
                    let expected = model.iter().position(|(mk, _)| *mk == k);
                    if let Some(pos) = expected {
                        model.remove(pos);
                    }
                    prop_assert_eq!(cache.delete(&k), expected.is_some());
                }
            }

            let order: Vec<u8> = cache.keys_by_recency().into_iter().copied().collect();
            let model_order: Vec<u8> = model.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(order, model_order);
        }
    }
}
