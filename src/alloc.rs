//! Storage provider for the table's parallel arrays.
//!
//! Buffers come back filled with `T::default()`, which for slot metadata
//! means "empty". Allocation failure is not recovered: the global allocator
//! aborts the process.

/// Hands out and takes back the contiguous arrays a table stores its slots in.
pub trait Allocator {
    /// A contiguous buffer of `len` default-initialized elements.
    fn allocate<T: Copy + Default>(&self, len: usize) -> Box<[T]>;

    /// Take back a buffer produced by `allocate`.
    fn release<T>(&self, buf: Box<[T]>) {
        drop(buf);
    }
}

/// The process-wide allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

impl Allocator for Global {
    #[inline]
    fn allocate<T: Copy + Default>(&self, len: usize) -> Box<[T]> {
        vec![T::default(); len].into_boxed_slice()
    }
}

impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline]
    fn allocate<T: Copy + Default>(&self, len: usize) -> Box<[T]> {
        (**self).allocate(len)
    }

    #[inline]
    fn release<T>(&self, buf: Box<[T]>) {
        (**self).release(buf)
    }
}
