use prime_table::primes::PRIMES;
use prime_table::{FnStrategy, InsertError, LoadBounds, Outcome, PrimeMap, RawTable, LOAD_HIGH};
use test_log::test;

fn constant_hash() -> FnStrategy {
    FnStrategy::with_hash(|_| 42)
}

/// Capacity reached by single growth steps, replaying the check each
/// insert makes against the count before its own record.
fn grown_capacity(n: usize) -> usize {
    let mut prime = 0;
    for used in 0..n {
        if f64::from(used as f32 / PRIMES[prime] as f32) > LOAD_HIGH {
            prime += 1;
        }
    }
    PRIMES[prime]
}

#[test]
fn scenario_insert_get_remove() {
    let mut m: PrimeMap<i32, i32> = PrimeMap::new();
    m.insert(1, 100).unwrap();
    m.insert(2, 200).unwrap();
    m.insert(3, 300).unwrap();
    assert_eq!(m.get(&2), Some(200));
    assert_eq!(m.len(), 3);

    assert!(m.remove(&2));
    assert_eq!(m.get(&2), None);
    assert_eq!(m.get(&1), Some(100));
    assert_eq!(m.get(&3), Some(300));
}

#[test]
fn update_semantics() {
    let mut m: PrimeMap<u32, u32> = PrimeMap::new();
    assert_eq!(m.insert(8, 1), Ok(Outcome::Inserted));
    let used = m.len();
    assert_eq!(m.insert(8, 2), Ok(Outcome::Updated));
    assert_eq!(m.len(), used);
    assert_eq!(m.get(&8), Some(2));
    assert_eq!(m.iter().filter(|&(k, _)| k == 8).count(), 1);
}

#[test]
fn removal_happens_once() {
    let mut m: PrimeMap<u32, u32> = PrimeMap::new();
    m.insert(8, 1).unwrap();
    assert!(m.remove(&8));
    assert_eq!(m.len(), 0);
    assert!(!m.remove(&8));
    assert_eq!(m.len(), 0);
}

/// Keys forced onto one home slot stay individually retrievable.
#[test]
fn collisions_remain_retrievable() {
    let mut m: PrimeMap<u32, u32, _> = PrimeMap::with_strategy(constant_hash());
    m.insert(1, 10).unwrap();
    m.insert(2, 20).unwrap();
    assert_eq!(m.get(&1), Some(10));
    assert_eq!(m.get(&2), Some(20));
}

/// A, B, C share a home slot and land in consecutive slots. After removing
/// B, `remove(C)` stops at B's empty slot and reports false, yet `get(C)`
/// scans past the gap and finds C. Both halves are intended behavior.
#[test]
fn get_and_remove_disagree_past_a_gap() {
    let mut m: PrimeMap<u32, u32, _> = PrimeMap::with_strategy(constant_hash());
    let (a, b, c) = (0xA, 0xB, 0xC);
    m.insert(a, 1).unwrap();
    m.insert(b, 2).unwrap();
    m.insert(c, 3).unwrap();

    assert!(m.remove(&b));
    assert!(!m.remove(&c));
    assert_eq!(m.get(&c), Some(3));
    assert_eq!(m.get(&a), Some(1));
    assert_eq!(m.len(), 2);
}

/// A resize compacts probe runs, after which the stranded key is removable.
#[test]
fn resize_makes_stranded_key_removable() {
    let mut m: PrimeMap<u32, u32, _> = PrimeMap::with_strategy(constant_hash());
    for n in 0..3 {
        m.insert(n, n).unwrap();
    }
    assert!(m.remove(&1));
    assert!(!m.remove(&2));

    // Fill until the next insert grows the table.
    let mut n = 100;
    while m.capacity() == PRIMES[0] {
        m.insert(n, n).unwrap();
        n += 1;
    }
    assert!(m.remove(&2));
    assert_eq!(m.get(&2), None);
}

#[test]
fn growth_follows_prime_sequence() {
    for n in [10usize, 11, 46, 47, 83, 84, 1000] {
        let mut m: PrimeMap<u64, u64> = PrimeMap::new();
        for k in 0..n as u64 {
            m.insert(k, k).unwrap();
        }
        assert_eq!(m.capacity(), grown_capacity(n), "after {n} inserts");
        assert_eq!(m.len(), n);
    }
    assert_eq!(grown_capacity(11), 53);
    assert_eq!(grown_capacity(47), 97);
    assert_eq!(grown_capacity(1000), 1543);
}

#[test]
fn many_keys_survive_many_resizes() {
    let mut m: PrimeMap<u32, u64> = PrimeMap::new();
    for k in 0..5000u32 {
        m.insert(k, u64::from(k) << 20).unwrap();
    }
    assert_eq!(m.capacity(), 6151);
    assert!((0..5000u32).all(|k| m.get(&k) == Some(u64::from(k) << 20)));
}

/// Removals alone never shrink; each insert then shrinks by at most one
/// step until the load is back above the low bound.
#[test]
fn shrink_walks_down_one_step_per_insert() {
    let identity = FnStrategy::with_hash(|key| {
        u64::from(u32::from_ne_bytes([key[0], key[1], key[2], key[3]]))
    });
    let mut m: PrimeMap<u32, u32, _> = PrimeMap::with_strategy(identity);
    for k in 0..100 {
        m.insert(k, k).unwrap();
    }
    assert_eq!(m.capacity(), 193);

    // Highest keys first so no removal has to look past a gap.
    for k in (3..100).rev() {
        assert!(m.remove(&k), "remove {k}");
    }
    assert_eq!(m.capacity(), 193);
    assert_eq!(m.len(), 3);

    let mut seen = Vec::new();
    for _ in 0..4 {
        m.insert(0, 0).unwrap();
        seen.push(m.capacity());
    }
    assert_eq!(seen, vec![97, 53, 11, 11]);
    assert_eq!(m.get(&2), Some(2));
}

#[test]
fn raw_table_record_widths() {
    let mut t = RawTable::new(3, 5);
    assert_eq!(t.insert(b"abc", b"01234"), Ok(Outcome::Inserted));
    assert_eq!(t.get(b"abc"), Some(&b"01234"[..]));
    assert_eq!(
        t.insert(b"abcd", b"01234"),
        Err(InsertError::KeySize {
            expected: 3,
            found: 4
        })
    );
    assert_eq!(
        t.insert(b"abc", b"0"),
        Err(InsertError::ValueSize {
            expected: 5,
            found: 1
        })
    );
}

#[test]
fn custom_bounds_delay_growth() {
    let bounds = LoadBounds::new(0.05, 0.95).unwrap();
    let mut m: PrimeMap<u8, u8> = PrimeMap::new().with_bounds(bounds);
    for k in 0..11u8 {
        m.insert(k, k).unwrap();
    }
    // 10 / 11 is below 0.95, so the eleventh record still fits in 11 slots.
    assert_eq!(m.capacity(), 11);
    m.insert(11, 11).unwrap();
    assert_eq!(m.capacity(), 53);
    assert_eq!(m.as_raw().bounds(), bounds);
}

#[test]
fn error_messages() {
    let e = InsertError::Full { capacity: 11 };
    assert_eq!(e.to_string(), "probed all 11 slots without finding a free one");
    let e = LoadBounds::new(0.9, 0.1).unwrap_err();
    assert_eq!(e.to_string(), "low bound 0.9 must be below high bound 0.1");
}
