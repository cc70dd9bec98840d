// HashTable property tests (public API).
//
// Property 1: round-trip and overwrite.
//  - Model: last value written per key.
//  - Invariant: get(k) == last written value; len() == distinct keys.
//
// Property 2: resize schedule.
//  - Inserting n distinct keys into a fresh table leaves the smallest
//    capacity c = 8 * 2^j with n < c; removing down to m keys never leaves
//    capacity below 8, and every survivor is retrievable.
//
// Property 3: collision correctness.
//  - A table whose strategy sends every key to bucket 0 answers every query
//    exactly like one using the golden-ratio strategy.
use chain_hashtable::{HashTable, MIN_CAPACITY};
use proptest::prelude::*;
use std::collections::HashMap;

fn bucket_zero(_: &i64, _: usize) -> usize {
    0
}

fn grown_capacity(n: usize) -> usize {
    let mut c = MIN_CAPACITY;
    while n >= c {
        c *= 2;
    }
    c
}

proptest! {
    #[test]
    fn prop_round_trip(pairs in proptest::collection::vec((any::<i64>(), any::<u32>()), 0..300)) {
        let mut t = HashTable::new();
        let mut model = HashMap::new();
        for (k, v) in pairs {
            prop_assert_eq!(t.insert(k, v), model.insert(k, v));
        }
        prop_assert_eq!(t.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(t.get(k), Some(v));
        }
    }

    #[test]
    fn prop_resize_schedule(n in 0usize..600, keep in 0usize..600) {
        let keep = keep.min(n);
        let mut t = HashTable::new();
        for k in 0..n as u64 {
            t.insert(k, k);
        }
        prop_assert_eq!(t.capacity(), grown_capacity(n));

        let mut previous = t.capacity();
        for k in keep as u64..n as u64 {
            prop_assert_eq!(t.remove(&k), Some(k));
            let c = t.capacity();
            prop_assert!(c >= MIN_CAPACITY);
            // At most one halving per removal.
            prop_assert!(c == previous || c * 2 == previous);
            if c > MIN_CAPACITY {
                prop_assert!(t.len() > c / 4 || c != previous);
            }
            previous = c;
        }
        prop_assert_eq!(t.len(), keep);
        for k in 0..keep as u64 {
            prop_assert_eq!(t.get(&k), Some(&k));
        }
    }

    #[test]
    fn prop_single_bucket_matches_golden_ratio(
        ops in proptest::collection::vec((any::<bool>(), -50i64..50), 1..200)
    ) {
        let mut golden = HashTable::new();
        let mut single = HashTable::with_strategy(bucket_zero);
        for (is_insert, k) in ops {
            if is_insert {
                prop_assert_eq!(golden.insert(k, k * 3), single.insert(k, k * 3));
            } else {
                prop_assert_eq!(golden.remove(&k), single.remove(&k));
            }
            prop_assert_eq!(golden.len(), single.len());
            prop_assert_eq!(golden.capacity(), single.capacity());
        }
        for k in -50i64..50 {
            prop_assert_eq!(golden.get(&k), single.get(&k));
        }
    }
}
