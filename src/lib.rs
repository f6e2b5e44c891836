//! prime-table: an open-addressing hash table over fixed-size records,
//! resized along a fixed sequence of prime capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable table whose capacities, probe order and
//!   resize points are fully determined by the operation sequence.
//! - Layers:
//!   - `mix`: stateless accumulator `h ^ (x + GOLDEN + (h << 6) + (h >> 2))`
//!     over primitives and bytes, plus a `Hasher`/`BuildHasher` pair.
//!   - `RawTable<S, A>`: the table proper. Keys and values are opaque byte
//!     records whose widths are fixed per instance; slot metadata, keys and
//!     values live in three parallel arrays obtained from an `Allocator`.
//!   - `PrimeMap<K, V, S, A>`: typed front end. `K`/`V` encode to fixed
//!     width records and the map forwards to a `RawTable`.
//!
//! Probing and removal
//! - Linear probing from `hash % capacity`, wrapping, at most one circuit.
//! - Each slot caches the key's hash; a slot matches when the cached hash
//!   is equal and the strategy's `eq` accepts the stored key.
//! - No tombstones: `remove` clears the slot. Consequently `get` keeps
//!   scanning past empty slots, while `remove` gives up at the first one.
//!   A key beyond a gap in its run is therefore visible to `get` but not
//!   removable, and inserting it again places a second, shadowing copy in
//!   the gap. A resize compacts runs and merges such copies.
//!
//! Resizing
//! - Capacities come from `primes::PRIMES` (27 entries, 11 up to
//!   1_610_612_741); the table starts at 11.
//! - Only `insert` checks the load factor, before placing its record. Above
//!   the high bound it grows one step, below the low bound it shrinks one
//!   step; neither moves past the ends of the sequence.
//! - A resize reinserts every record through `insert` in old slot order.
//!   The table is in `Phase::Resizing` meanwhile, and load maintenance is a
//!   no-op in that phase, so reinsertion cannot trigger another resize.
//!
//! Strategies
//! - `KeyStrategy` (hash + eq over key bytes) is a generic parameter.
//!   `Bytewise` hashes with `mix::hash_bytes` and compares bytes;
//!   `FnStrategy` takes function pointers chosen at runtime; `Decoded`
//!   adapts a `TypedStrategy<K>` (for example `Hashed<impl BuildHasher>`)
//!   onto the byte layer.
//!
//! Notes and non-goals
//! - Single-threaded; mutation needs `&mut self`, and there is no locking.
//! - No iteration order guarantees; iteration is slot order.
//! - No variable-length keys or values.
//! - Allocation failure is fatal, as with any `Box`.

pub mod alloc;
pub mod config;
pub mod mix;
pub mod prime_map;
pub mod primes;
pub mod raw_table;
mod raw_table_proptest;
pub mod record;
pub mod strategy;

// Public surface
pub use alloc::{Allocator, Global};
pub use config::{BoundsError, LoadBounds, LOAD_HIGH, LOAD_LOW};
pub use mix::{hash_bytes, BuildMixHasher, MixHasher};
pub use prime_map::PrimeMap;
pub use raw_table::{InsertError, Outcome, RawTable};
pub use record::Record;
pub use strategy::{Bytewise, Decoded, FnStrategy, Hashed, KeyStrategy, TypedStrategy};
