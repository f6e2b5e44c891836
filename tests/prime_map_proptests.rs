// PrimeMap property tests.
//
// Property 1: round trip. Every key inserted (last write wins) reads back
// its latest value, and the map holds exactly the distinct keys.
//
// Property 2: growth. Inserting N distinct keys into a fresh map lands on
// the capacity reached by stepping through the prime sequence whenever the
// count before an insert exceeds the high bound.
use prime_table::primes::PRIMES;
use prime_table::{PrimeMap, LOAD_HIGH};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn grown_capacity(n: usize) -> usize {
    let mut prime = 0;
    for used in 0..n {
        if f64::from(used as f32 / PRIMES[prime] as f32) > LOAD_HIGH {
            prime += 1;
        }
    }
    PRIMES[prime]
}

proptest! {
    #[test]
    fn prop_round_trip(pairs in proptest::collection::vec((any::<i64>(), any::<u32>()), 0..400)) {
        let mut m: PrimeMap<i64, u32> = PrimeMap::new();
        let mut model = BTreeMap::new();
        for (k, v) in pairs {
            m.insert(k, v).unwrap();
            model.insert(k, v);
            prop_assert_eq!(m.get(&k), Some(v));
        }
        prop_assert_eq!(m.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(*v));
        }
        let pairs: BTreeMap<i64, u32> = m.iter().collect();
        prop_assert_eq!(pairs, model);
    }

    #[test]
    fn prop_growth_capacity(keys in proptest::collection::btree_set(any::<u64>(), 0..2000)) {
        let mut m: PrimeMap<u64, u8> = PrimeMap::new();
        for &k in &keys {
            m.insert(k, 0).unwrap();
        }
        prop_assert_eq!(m.len(), keys.len());
        prop_assert_eq!(m.capacity(), grown_capacity(keys.len()));
        let back: BTreeSet<u64> = m.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(back, keys);
    }
}
