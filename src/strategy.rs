//! Key strategies: how a table hashes and compares its key records.

use crate::mix;
use crate::record::Record;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

/// Hash and equality over raw key records.
///
/// Both methods only ever see slices of exactly the table's key size.
pub trait KeyStrategy {
    fn hash(&self, key: &[u8]) -> u64;

    #[inline]
    fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        a == b
    }
}

/// Default strategy: the key is an opaque blob, hashed with
/// [`mix::hash_bytes`] and compared byte for byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bytewise;

impl KeyStrategy for Bytewise {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        mix::hash_bytes(key)
    }
}

/// Strategy chosen at runtime from plain function pointers.
#[derive(Clone, Copy, Debug)]
pub struct FnStrategy {
    pub hash: fn(&[u8]) -> u64,
    pub eq: fn(&[u8], &[u8]) -> bool,
}

impl FnStrategy {
    /// Custom hash with byte-wise equality.
    pub fn with_hash(hash: fn(&[u8]) -> u64) -> Self {
        Self {
            hash,
            eq: |a, b| a == b,
        }
    }
}

impl Default for FnStrategy {
    fn default() -> Self {
        Self::with_hash(mix::hash_bytes)
    }
}

impl KeyStrategy for FnStrategy {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        (self.eq)(a, b)
    }
}

impl<S: KeyStrategy + ?Sized> KeyStrategy for &S {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }

    #[inline]
    fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        (**self).eq(a, b)
    }
}

impl<S: KeyStrategy + ?Sized> KeyStrategy for Box<S> {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }

    #[inline]
    fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        (**self).eq(a, b)
    }
}

/// Hash and equality over decoded keys of type `K`.
pub trait TypedStrategy<K> {
    fn hash(&self, key: &K) -> u64;
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// Typed strategy from any `BuildHasher`, with `K: Eq` equality.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hashed<B>(pub B);

impl<K, B> TypedStrategy<K> for Hashed<B>
where
    K: Hash + Eq,
    B: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.0.hash_one(key)
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Runs a [`TypedStrategy<K>`] on raw records by decoding them first.
pub struct Decoded<K, T> {
    inner: T,
    _key: PhantomData<fn(&K)>,
}

impl<K, T> Decoded<K, T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            _key: PhantomData,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<K, T: Clone> Clone for Decoded<K, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<K, T: core::fmt::Debug> core::fmt::Debug for Decoded<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Decoded").field(&self.inner).finish()
    }
}

impl<K: Record, T: TypedStrategy<K>> KeyStrategy for Decoded<K, T> {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self.inner.hash(&K::from_bytes(key))
    }

    #[inline]
    fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        self.inner.eq(&K::from_bytes(a), &K::from_bytes(b))
    }
}
