//! Fixed-width byte encodings for typed keys and values.

/// A value with a fixed-width byte representation.
///
/// The encoding is the value's native in-memory layout, so a record hashed
/// by [`Bytewise`](crate::strategy::Bytewise) hashes the same bytes a raw
/// memory copy of the value would contain.
pub trait Record: Copy {
    type Bytes: AsRef<[u8]>;

    const SIZE: usize = core::mem::size_of::<Self::Bytes>();

    fn to_bytes(&self) -> Self::Bytes;

    /// Decode from exactly `SIZE` bytes.
    fn from_bytes(bytes: &[u8]) -> Self;
}

#[inline]
fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

macro_rules! impl_record_num {
    ($($t:ty),* $(,)?) => {
        $(
            impl Record for $t {
                type Bytes = [u8; core::mem::size_of::<$t>()];

                #[inline]
                fn to_bytes(&self) -> Self::Bytes {
                    self.to_ne_bytes()
                }

                #[inline]
                fn from_bytes(bytes: &[u8]) -> Self {
                    <$t>::from_ne_bytes(array(bytes))
                }
            }
        )*
    };
}

impl_record_num!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Record for bool {
    type Bytes = [u8; 1];

    #[inline]
    fn to_bytes(&self) -> Self::Bytes {
        [u8::from(*self)]
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Zero-width record; a `PrimeMap<K, ()>` is a set.
impl Record for () {
    type Bytes = [u8; 0];

    #[inline]
    fn to_bytes(&self) -> Self::Bytes {
        []
    }

    #[inline]
    fn from_bytes(_bytes: &[u8]) -> Self {}
}

impl<const N: usize> Record for [u8; N] {
    type Bytes = [u8; N];

    #[inline]
    fn to_bytes(&self) -> Self::Bytes {
        *self
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Self {
        array(bytes)
    }
}
