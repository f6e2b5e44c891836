//! PrimeMap: typed keys and values over a `RawTable`.

use crate::alloc::{Allocator, Global};
use crate::config::LoadBounds;
use crate::raw_table::{self, InsertError, Outcome, RawTable};
use crate::record::Record;
use crate::strategy::{Bytewise, Decoded, KeyStrategy, TypedStrategy};
use core::fmt;
use core::marker::PhantomData;

/// Hash map from `K` to `V`, both stored as fixed-width records.
///
/// Lookups hand back decoded copies. Semantics, including the probe
/// asymmetry between `get` and `remove`, are those of [`RawTable`].
pub struct PrimeMap<K, V, S = Bytewise, A: Allocator = Global> {
    raw: RawTable<S, A>,
    _pd: PhantomData<fn() -> (K, V)>,
}

impl<K: Record, V: Record> PrimeMap<K, V> {
    pub fn new() -> Self {
        Self::with_strategy(Bytewise)
    }
}

impl<K: Record, V: Record> Default for PrimeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Record, V: Record, S: KeyStrategy> PrimeMap<K, V, S> {
    /// Strategy over the encoded key bytes.
    pub fn with_strategy(strategy: S) -> Self {
        Self::with_strategy_in(strategy, Global)
    }
}

impl<K: Record, V: Record, T: TypedStrategy<K>> PrimeMap<K, V, Decoded<K, T>> {
    /// Strategy over decoded keys.
    pub fn with_key_strategy(strategy: T) -> Self {
        Self::with_strategy(Decoded::new(strategy))
    }
}

impl<K, V, S, A> PrimeMap<K, V, S, A>
where
    K: Record,
    V: Record,
    S: KeyStrategy,
    A: Allocator,
{
    pub fn with_strategy_in(strategy: S, alloc: A) -> Self {
        Self {
            raw: RawTable::with_strategy_in(K::SIZE, V::SIZE, strategy, alloc),
            _pd: PhantomData,
        }
    }

    pub fn with_bounds(self, bounds: LoadBounds) -> Self {
        Self {
            raw: self.raw.with_bounds(bounds),
            _pd: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    /// The underlying byte table.
    pub fn as_raw(&self) -> &RawTable<S, A> {
        &self.raw
    }

    pub fn insert(&mut self, key: K, value: V) -> Result<Outcome, InsertError> {
        self.raw
            .insert(key.to_bytes().as_ref(), value.to_bytes().as_ref())
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.raw.get(key.to_bytes().as_ref()).map(V::from_bytes)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.contains_key(key.to_bytes().as_ref())
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.raw.remove(key.to_bytes().as_ref())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.raw.iter(),
            _pd: PhantomData,
        }
    }
}

impl<K, V, S, A: Allocator> fmt::Debug for PrimeMap<K, V, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrimeMap").field(&self.raw).finish()
    }
}

/// Iterator over decoded `(key, value)` pairs, in slot order.
pub struct Iter<'a, K, V> {
    it: raw_table::Iter<'a>,
    _pd: PhantomData<fn() -> (K, V)>,
}

impl<'a, K: Record, V: Record> Iterator for Iter<'a, K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(k, v)| (K::from_bytes(k), V::from_bytes(v)))
    }
}
