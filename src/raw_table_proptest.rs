#![cfg(test)]

// Property tests for RawTable kept inside the crate so they can reach the
// prime sequence and strategies without going through the public surface.

use crate::config::LOAD_HIGH;
use crate::primes::PRIMES;
use crate::raw_table::{Outcome, RawTable};
use crate::strategy::{FnStrategy, KeyStrategy};
use hashbrown::{HashMap, HashSet};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, u32),
    Get(usize),
    Remove(usize),
    Iterate,
}

fn arb_pool() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::hash_set(any::<u32>(), 1..=48).prop_map(|s| s.into_iter().collect())
}

fn arb_scenario(with_removes: bool) -> impl Strategy<Value = (Vec<u32>, Vec<OpI>)> {
    arb_pool().prop_flat_map(move |pool| {
        let idx = 0..pool.len();
        let op = if with_removes {
            prop_oneof![
                4 => (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Get),
                3 => idx.clone().prop_map(OpI::Remove),
                1 => Just(OpI::Iterate),
            ]
            .boxed()
        } else {
            prop_oneof![
                4 => (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Get),
                1 => Just(OpI::Iterate),
            ]
            .boxed()
        };
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn bytes(n: u32) -> [u8; 4] {
    n.to_ne_bytes()
}

fn decode(b: &[u8]) -> u32 {
    u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
}

fn check_shape<S: KeyStrategy>(t: &RawTable<S>) -> Result<(), TestCaseError> {
    prop_assert_eq!(t.capacity(), PRIMES[t.prime_index()]);
    prop_assert_eq!(t.len(), t.iter().count());
    prop_assert!(t.len() <= t.capacity());
    Ok(())
}

// Property: without removals the table is equivalent to a HashMap model.
// Invariants exercised:
// - insert reports Inserted exactly for new keys, Updated for present ones.
// - get parity with the model for every pooled key.
// - iteration yields exactly the model's pairs.
// - after each insert, the load seen by that insert's check, (len - 1) / cap,
//   is within the high bound.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_insert_get_matches_model((pool, ops) in arb_scenario(false)) {
        let mut sut = RawTable::new(4, 4);
        let mut model: HashMap<u32, u32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i];
                    let expected = if model.insert(k, v).is_some() {
                        Outcome::Updated
                    } else {
                        Outcome::Inserted
                    };
                    prop_assert_eq!(sut.insert(&bytes(k), &bytes(v)), Ok(expected));
                    let load = f64::from((sut.len() - 1) as f32 / sut.capacity() as f32);
                    prop_assert!(load <= LOAD_HIGH, "load {} above bound", load);
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(&bytes(k)).map(decode), model.get(&k).copied());
                }
                OpI::Remove(_) => unreachable!("no removals in this scenario"),
                OpI::Iterate => {
                    let seen: HashMap<u32, u32> =
                        sut.iter().map(|(k, v)| (decode(k), decode(v))).collect();
                    prop_assert_eq!(&seen, &model);
                }
            }
            check_shape(&sut)?;
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}

// Invariants that survive removals, given that remove stops at the first
// gap while get does not:
// - a successful insert is immediately visible to get.
// - remove returning true drops len by one; false leaves it unchanged.
// - keys never inserted are never found and never removed.
// - every key iteration yields is visible to get.
fn run_with_removes<S: KeyStrategy>(
    mut sut: RawTable<S>,
    pool: &[u32],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut ever: HashSet<u32> = HashSet::new();
    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i];
                prop_assert!(sut.insert(&bytes(k), &bytes(v)).is_ok());
                ever.insert(k);
                prop_assert_eq!(sut.get(&bytes(k)).map(decode), Some(v));
            }
            OpI::Get(i) => {
                let k = pool[i];
                if !ever.contains(&k) {
                    prop_assert!(sut.get(&bytes(k)).is_none());
                }
            }
            OpI::Remove(i) => {
                let k = pool[i];
                let before = sut.len();
                if sut.remove(&bytes(k)) {
                    prop_assert!(ever.contains(&k));
                    prop_assert_eq!(sut.len(), before - 1);
                } else {
                    prop_assert_eq!(sut.len(), before);
                }
            }
            OpI::Iterate => {
                let keys: Vec<u32> = sut.iter().map(|(k, _)| decode(k)).collect();
                for k in keys {
                    prop_assert!(ever.contains(&k));
                    prop_assert!(sut.contains_key(&bytes(k)));
                }
            }
        }
        check_shape(&sut)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_removals_keep_table_consistent((pool, ops) in arb_scenario(true)) {
        run_with_removes(RawTable::new(4, 4), &pool, ops)?;
    }

    // Same invariants with every key hashing into one of three home slots,
    // so probe runs are long and removals leave gaps inside them.
    #[test]
    fn prop_removals_with_clustered_hashes((pool, ops) in arb_scenario(true)) {
        let clustered = FnStrategy::with_hash(|key| u64::from(key[0] % 3));
        run_with_removes(RawTable::with_strategy(4, 4, clustered), &pool, ops)?;
    }
}
