//! RawTable: open-addressing table over fixed-size byte records.

use crate::alloc::{Allocator, Global};
use crate::config::LoadBounds;
use crate::primes;
use crate::strategy::{Bytewise, KeyStrategy};
use core::fmt;
use core::mem;
use core::ops::Range;
use thiserror::Error;

/// Per-slot metadata. `Default` is the empty slot.
#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    hash: u64,
    occupied: bool,
}

/// Whether a resize's reinsertion pass is running. Load maintenance only
/// acts in `Stable`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Stable,
    Resizing,
}

/// What a successful insert did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The record went into an empty slot.
    Inserted,
    /// An equal key was found and its value overwritten.
    Updated,
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum InsertError {
    #[error("probed all {capacity} slots without finding a free one")]
    Full { capacity: usize },
    #[error("key is {found} bytes but the table stores {expected}-byte keys")]
    KeySize { expected: usize, found: usize },
    #[error("value is {found} bytes but the table stores {expected}-byte values")]
    ValueSize { expected: usize, found: usize },
}

/// Open-addressing hash table with linear probing over three parallel
/// arrays: slot metadata, key bytes and value bytes.
///
/// Capacity is always an entry of [`primes::PRIMES`]. Removal clears the
/// slot in place, so `get` scans past empty slots while `remove` stops at
/// the first one; a key sitting beyond a gap in its probe run stays
/// visible to `get` but cannot be removed until a resize compacts the run.
pub struct RawTable<S = Bytewise, A: Allocator = Global> {
    strategy: S,
    alloc: A,
    bounds: LoadBounds,
    key_size: usize,
    value_size: usize,
    slots: Box<[Slot]>,
    keys: Box<[u8]>,
    values: Box<[u8]>,
    used: usize,
    prime: usize,
    phase: Phase,
}

impl RawTable {
    /// Table with byte-wise hashing and equality.
    pub fn new(key_size: usize, value_size: usize) -> Self {
        Self::with_strategy_in(key_size, value_size, Bytewise, Global)
    }
}

impl<S: KeyStrategy> RawTable<S> {
    pub fn with_strategy(key_size: usize, value_size: usize, strategy: S) -> Self {
        Self::with_strategy_in(key_size, value_size, strategy, Global)
    }
}

impl<S: KeyStrategy, A: Allocator> RawTable<S, A> {
    pub fn with_strategy_in(key_size: usize, value_size: usize, strategy: S, alloc: A) -> Self {
        let capacity = primes::PRIMES[0];
        Self {
            slots: alloc.allocate(capacity),
            keys: alloc.allocate(capacity * key_size),
            values: alloc.allocate(capacity * value_size),
            strategy,
            alloc,
            bounds: LoadBounds::default(),
            key_size,
            value_size,
            used: 0,
            prime: 0,
            phase: Phase::Stable,
        }
    }

    /// Replace the load bounds. Takes effect on the next insert.
    pub fn with_bounds(mut self, bounds: LoadBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn len(&self) -> usize {
        self.used
    }
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    /// Position of the current capacity in [`primes::PRIMES`].
    pub fn prime_index(&self) -> usize {
        self.prime
    }
    pub fn key_size(&self) -> usize {
        self.key_size
    }
    pub fn value_size(&self) -> usize {
        self.value_size
    }
    pub fn bounds(&self) -> LoadBounds {
        self.bounds
    }
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// `used / capacity`, computed in single precision.
    pub fn load_factor(&self) -> f64 {
        f64::from(self.used as f32 / self.capacity() as f32)
    }

    #[inline]
    fn key_range(&self, idx: usize) -> Range<usize> {
        idx * self.key_size..(idx + 1) * self.key_size
    }

    #[inline]
    fn value_range(&self, idx: usize) -> Range<usize> {
        idx * self.value_size..(idx + 1) * self.value_size
    }

    #[inline]
    fn key_at(&self, idx: usize) -> &[u8] {
        &self.keys[self.key_range(idx)]
    }

    #[inline]
    fn value_at(&self, idx: usize) -> &[u8] {
        &self.values[self.value_range(idx)]
    }

    /// Slot indices from `hash mod capacity`, wrapping, one full circuit.
    #[inline]
    fn probe(&self, hash: u64) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let start = (hash % capacity as u64) as usize;
        (0..capacity).map(move |i| (start + i) % capacity)
    }

    fn find(&self, key: &[u8]) -> Option<usize> {
        if key.len() != self.key_size {
            return None;
        }
        let hash = self.strategy.hash(key);
        // Empty slots do not end the search: removals leave gaps mid-run.
        self.probe(hash).find(|&idx| {
            let slot = self.slots[idx];
            slot.occupied && slot.hash == hash && self.strategy.eq(self.key_at(idx), key)
        })
    }

    /// Insert or update. May first resize by one prime step to bring the
    /// load factor back inside the bounds.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<Outcome, InsertError> {
        if key.len() != self.key_size {
            return Err(InsertError::KeySize {
                expected: self.key_size,
                found: key.len(),
            });
        }
        if value.len() != self.value_size {
            return Err(InsertError::ValueSize {
                expected: self.value_size,
                found: value.len(),
            });
        }

        self.maintain_load();

        let hash = self.strategy.hash(key);
        for idx in self.probe(hash) {
            let slot = self.slots[idx];
            if !slot.occupied {
                self.slots[idx] = Slot {
                    hash,
                    occupied: true,
                };
                let (kr, vr) = (self.key_range(idx), self.value_range(idx));
                self.keys[kr].copy_from_slice(key);
                self.values[vr].copy_from_slice(value);
                self.used += 1;
                return Ok(Outcome::Inserted);
            }
            if slot.hash == hash && self.strategy.eq(self.key_at(idx), key) {
                let vr = self.value_range(idx);
                self.values[vr].copy_from_slice(value);
                return Ok(Outcome::Updated);
            }
        }

        log::warn!(
            "insert found no free slot, capacity={}, used={}",
            self.capacity(),
            self.used
        );
        Err(InsertError::Full {
            capacity: self.capacity(),
        })
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.find(key).map(|idx| self.value_at(idx))
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut [u8]> {
        let idx = self.find(key)?;
        let vr = self.value_range(idx);
        Some(&mut self.values[vr])
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Remove `key`. Gives up at the first empty slot in the probe run.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        if key.len() != self.key_size {
            return false;
        }
        let hash = self.strategy.hash(key);
        for idx in self.probe(hash) {
            let slot = self.slots[idx];
            if !slot.occupied {
                return false;
            }
            if slot.hash == hash && self.strategy.eq(self.key_at(idx), key) {
                self.slots[idx] = Slot::default();
                self.used -= 1;
                return true;
            }
        }
        false
    }

    /// Occupied records in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter().enumerate(),
            keys: &self.keys,
            values: &self.values,
            key_size: self.key_size,
            value_size: self.value_size,
        }
    }

    /// The single point where resizes are triggered.
    fn maintain_load(&mut self) {
        if self.phase == Phase::Resizing {
            return;
        }
        let load = self.load_factor();
        if self.bounds.above(load) {
            match primes::grow(self.prime) {
                Some(next) => self.resize_to(next),
                None => log::trace!(
                    "load {load:.3} above bound but capacity {} is the largest",
                    self.capacity()
                ),
            }
        } else if self.bounds.below(load) {
            if let Some(prev) = primes::shrink(self.prime) {
                if self.used < primes::PRIMES[prev] {
                    self.resize_to(prev);
                } else {
                    log::trace!(
                        "load {load:.3} below bound but {} records do not fit {} slots",
                        self.used,
                        primes::PRIMES[prev]
                    );
                }
            }
        }
    }

    /// Move every record into fresh arrays sized `PRIMES[prime]`, in old
    /// slot order, through `insert`.
    fn resize_to(&mut self, prime: usize) {
        let capacity = primes::PRIMES[prime];
        let old_capacity = self.capacity();
        let moved = self.used;

        let old_slots = mem::replace(&mut self.slots, self.alloc.allocate(capacity));
        let old_keys = mem::replace(
            &mut self.keys,
            self.alloc.allocate(capacity * self.key_size),
        );
        let old_values = mem::replace(
            &mut self.values,
            self.alloc.allocate(capacity * self.value_size),
        );
        self.prime = prime;
        self.used = 0;

        self.phase = Phase::Resizing;
        for (idx, slot) in old_slots.iter().enumerate() {
            if !slot.occupied {
                continue;
            }
            let key = &old_keys[idx * self.key_size..(idx + 1) * self.key_size];
            let value = &old_values[idx * self.value_size..(idx + 1) * self.value_size];
            if let Err(e) = self.insert(key, value) {
                log::error!("record lost while resizing to {capacity} slots: {e}");
            }
        }
        self.phase = Phase::Stable;

        self.alloc.release(old_slots);
        self.alloc.release(old_keys);
        self.alloc.release(old_values);

        log::debug!(
            "resized table from {old_capacity} to {capacity} slots, moved {moved} records into {}",
            self.used
        );
    }
}

impl<S, A: Allocator> Drop for RawTable<S, A> {
    fn drop(&mut self) {
        self.alloc.release(mem::take(&mut self.slots));
        self.alloc.release(mem::take(&mut self.keys));
        self.alloc.release(mem::take(&mut self.values));
        self.used = 0;
        self.prime = 0;
    }
}

impl<S, A: Allocator> fmt::Debug for RawTable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTable")
            .field("key_size", &self.key_size)
            .field("value_size", &self.value_size)
            .field("used", &self.used)
            .field("capacity", &self.slots.len())
            .field("prime", &self.prime)
            .finish()
    }
}

/// Iterator over occupied `(key, value)` records of a `RawTable`.
pub struct Iter<'a> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Slot>>,
    keys: &'a [u8],
    values: &'a [u8],
    key_size: usize,
    value_size: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, _) = self.slots.find(|(_, s)| s.occupied)?;
        let (ks, vs) = (self.key_size, self.value_size);
        Some((
            &self.keys[idx * ks..(idx + 1) * ks],
            &self.values[idx * vs..(idx + 1) * vs],
        ))
    }
}
