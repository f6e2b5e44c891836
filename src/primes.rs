//! Capacity sequence: primes spaced roughly a factor of two apart, each far
//! from the neighbouring powers of two (planetmath "good hash table primes",
//! preceded by 11).

pub const PRIMES: [usize; 27] = [
    11, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613, 393241,
    786433, 1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319, 201326611,
    402653189, 805306457, 1610612741,
];

/// Index of the largest capacity.
pub const LAST: usize = PRIMES.len() - 1;

/// Capacity at `index`, or `None` past the end of the sequence.
#[inline]
pub fn capacity_at(index: usize) -> Option<usize> {
    PRIMES.get(index).copied()
}

/// Index one step up, or `None` at the largest capacity.
#[inline]
pub fn grow(index: usize) -> Option<usize> {
    (index < LAST).then_some(index + 1)
}

/// Index one step down, or `None` at the smallest capacity.
#[inline]
pub fn shrink(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_ascending() {
        assert!(PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(PRIMES[0], 11);
        assert_eq!(PRIMES[LAST], 1_610_612_741);
    }

    #[test]
    fn all_entries_prime() {
        let is_prime = |n: usize| n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0);
        for p in PRIMES {
            assert!(is_prime(p), "{p} is not prime");
        }
    }

    /// Invariant: stepping never leaves the sequence.
    #[test]
    fn steps_saturate_at_bounds() {
        assert_eq!(grow(0), Some(1));
        assert_eq!(grow(LAST), None);
        assert_eq!(shrink(0), None);
        assert_eq!(shrink(LAST), Some(LAST - 1));
        assert_eq!(capacity_at(LAST + 1), None);
        assert_eq!(capacity_at(3), Some(193));
    }
}
