//! Property-Based Tests for the Store Module
//!
//! Uses proptest to check the in-memory keyspace against Redis semantics.

use proptest::prelude::*;
use std::collections::BTreeSet;

use crate::error::StoreError;
use crate::store::MemoryStore;

// == Test Configuration ==
const KEY: &str = "k";

// == Strategies ==
/// Generates keys made of the characters routes accept in a path segment
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,32}".prop_map(|s| s)
}

/// Generates arbitrary binary-safe values
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Operations that create a key with a fixed structure
#[derive(Debug, Clone, Copy)]
enum Shape {
    String,
    List,
    Set,
    Hash,
    SortedSet,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::String),
        Just(Shape::List),
        Just(Shape::Set),
        Just(Shape::Hash),
        Just(Shape::SortedSet),
    ]
}

fn create(store: &mut MemoryStore, shape: Shape) {
    match shape {
        Shape::String => store.set(KEY, b"v"),
        Shape::List => {
            store.lpush(KEY, b"v").unwrap();
        }
        Shape::Set => {
            store.sadd(KEY, b"v").unwrap();
        }
        Shape::Hash => {
            store.hset(KEY, b"f", b"v").unwrap();
        }
        Shape::SortedSet => {
            store.zadd(KEY, b"v", 1.0).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a scalar then reading it returns the stored bytes
    #[test]
    fn prop_set_then_get(key in key_strategy(), value in value_strategy()) {
        let mut store = MemoryStore::new();

        store.set(&key, &value);

        prop_assert_eq!(store.get(&key).unwrap(), Some(value));
    }

    // LPUSH of a sequence reads back in reverse push order
    #[test]
    fn prop_lpush_reverses_order(values in prop::collection::vec(value_strategy(), 1..30)) {
        let mut store = MemoryStore::new();

        for value in &values {
            store.lpush(KEY, value).unwrap();
        }

        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(store.lrange(KEY).unwrap(), expected);
    }

    // A set holds each distinct member exactly once
    #[test]
    fn prop_sadd_deduplicates(members in prop::collection::vec(value_strategy(), 1..50)) {
        let mut store = MemoryStore::new();
        let mut added = 0usize;

        for member in &members {
            if store.sadd(KEY, member).unwrap() {
                added += 1;
            }
        }

        let distinct: BTreeSet<Vec<u8>> = members.into_iter().collect();
        prop_assert_eq!(added, distinct.len());
        prop_assert_eq!(store.smembers(KEY).unwrap(), distinct.into_iter().collect::<Vec<_>>());
    }

    // Sorted set range is non-decreasing in score
    #[test]
    fn prop_zrange_is_score_ordered(
        entries in prop::collection::vec((value_strategy(), -1000i64..1000), 1..50)
    ) {
        let mut store = MemoryStore::new();

        for (member, score) in &entries {
            store.zadd(KEY, member, *score as f64).unwrap();
        }

        let range = store.zrange_withscores(KEY).unwrap();
        for pair in range.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1, "Scores out of order: {:?}", pair);
        }
    }

    // INCR N times yields a strictly increasing sequence ending at start + N
    #[test]
    fn prop_incr_strictly_increasing(start in -10_000i64..10_000, n in 1usize..50) {
        let mut store = MemoryStore::new();
        store.set(KEY, start.to_string().as_bytes());

        let mut previous = start;
        for _ in 0..n {
            let current = store.incr(KEY).unwrap();
            prop_assert!(current > previous);
            previous = current;
        }

        prop_assert_eq!(previous, start + n as i64);
    }

    // Every collection command against a key of another structure fails with
    // WrongType and leaves the key as it was
    #[test]
    fn prop_mismatched_structure_is_wrong_type(shape in shape_strategy()) {
        let mut store = MemoryStore::new();
        create(&mut store, shape);
        let before = store.key_type(KEY);

        let results = [
            (Shape::String, store.get(KEY).map(|_| ())),
            (Shape::List, store.lpush(KEY, b"x").map(|_| ())),
            (Shape::Set, store.sadd(KEY, b"x").map(|_| ())),
            (Shape::Hash, store.hset(KEY, b"x", b"y").map(|_| ())),
            (Shape::SortedSet, store.zadd(KEY, b"x", 2.0).map(|_| ())),
        ];

        for (expected_shape, result) in results {
            let same = std::mem::discriminant(&expected_shape) == std::mem::discriminant(&shape);
            if same {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(StoreError::WrongType));
            }
        }

        prop_assert_eq!(store.key_type(KEY), before);
        prop_assert_eq!(store.len(), 1);
    }
}
