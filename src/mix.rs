//! Mixing library: stateless hash accumulation over primitives and bytes.
//!
//! Every function folds one value into a running `u64` hash with
//! `hash ^ (value + GOLDEN + (hash << 6) + (hash >> 2))`. This scatters keys
//! across slots; it is not a cryptographic hash.
//!
//! Floats are mixed by bit pattern with no normalization, so `0.0` and
//! `-0.0` (or two NaNs with different payloads) produce different hashes.

use core::ffi::CStr;
use core::hash::{BuildHasher, Hasher};

/// Additive constant of the accumulator (32-bit golden ratio).
pub const GOLDEN: u64 = 0x9E37_79B9;

/// Seed used by [`hash_bytes`] and the default [`BuildMixHasher`].
pub const BYTES_SEED: u64 = 0xDEAD_BEEF;

#[inline(always)]
fn accumulate(hash: u64, x: u64) -> u64 {
    hash ^ x
        .wrapping_add(GOLDEN)
        .wrapping_add(hash << 6)
        .wrapping_add(hash >> 2)
}

/// A primitive that can be folded into a running hash.
pub trait Mix: Copy {
    fn mix_into(self, hash: u64) -> u64;
}

macro_rules! impl_mix_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Mix for $t {
                #[inline(always)]
                fn mix_into(self, hash: u64) -> u64 {
                    // Signed types sign-extend to 64 bits.
                    accumulate(hash, self as u64)
                }
            }
        )*
    };
}

impl_mix_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Mix for char {
    #[inline(always)]
    fn mix_into(self, hash: u64) -> u64 {
        accumulate(hash, u64::from(u32::from(self)))
    }
}

impl Mix for f32 {
    #[inline(always)]
    fn mix_into(self, hash: u64) -> u64 {
        self.to_bits().mix_into(hash)
    }
}

impl Mix for f64 {
    #[inline(always)]
    fn mix_into(self, hash: u64) -> u64 {
        self.to_bits().mix_into(hash)
    }
}

/// Fold `x` into `hash`.
#[inline(always)]
pub fn mix<T: Mix>(hash: u64, x: T) -> u64 {
    x.mix_into(hash)
}

/// Fold each byte of `bytes` through the byte mixer, in order.
#[inline]
pub fn mix_bytes(hash: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(hash, |h, &b| mix(h, b))
}

/// Fold the UTF-8 bytes of `s`.
#[inline]
pub fn mix_str(hash: u64, s: &str) -> u64 {
    mix_bytes(hash, s.as_bytes())
}

/// Fold a null-terminated string, excluding the terminator.
#[inline]
pub fn mix_cstr(hash: u64, s: &CStr) -> u64 {
    mix_bytes(hash, s.to_bytes())
}

/// Fold a pointer's address.
#[inline(always)]
pub fn mix_ptr<T: ?Sized>(hash: u64, ptr: *const T) -> u64 {
    mix(hash, ptr.cast::<()>() as usize)
}

/// Fold a sequence of pointer addresses.
#[inline]
pub fn mix_ptrs<T>(hash: u64, ptrs: &[*const T]) -> u64 {
    ptrs.iter().fold(hash, |h, &p| mix_ptr(h, p))
}

/// Default key hash: `bytes` folded from [`BYTES_SEED`].
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    mix_bytes(BYTES_SEED, bytes)
}

/// `Hasher` driven by the mixer. Byte writes fold each byte; integer
/// writes fold the integer as one value.
#[derive(Clone, Copy, Debug)]
pub struct MixHasher {
    hash: u64,
}

impl MixHasher {
    pub const fn with_seed(seed: u64) -> Self {
        Self { hash: seed }
    }
}

impl Default for MixHasher {
    fn default() -> Self {
        Self::with_seed(BYTES_SEED)
    }
}

impl Hasher for MixHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.hash = mix_bytes(self.hash, bytes);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.hash = mix(self.hash, i);
    }
    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.hash = mix(self.hash, i);
    }
}

/// `BuildHasher` producing [`MixHasher`]s from a fixed seed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildMixHasher {
    seed: u64,
}

impl BuildMixHasher {
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for BuildMixHasher {
    fn default() -> Self {
        Self::with_seed(BYTES_SEED)
    }
}

impl BuildHasher for BuildMixHasher {
    type Hasher = MixHasher;

    fn build_hasher(&self) -> Self::Hasher {
        MixHasher::with_seed(self.seed)
    }
}
