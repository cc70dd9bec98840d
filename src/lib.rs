//! chain-hashtable: a single-threaded key-value hash table built from a
//! fixed-size bucket array, doubly linked chains, and a pluggable
//! bucket-index strategy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep each piece of the classic chained table small enough to be
//!   reasoned about on its own, with the resize policy in one place.
//! - Layers:
//!   - Chain<K, V>: doubly linked list of entries. Nodes sit in a per-chain
//!     `SlotMap`; `prev`/`next` are generational keys, so unlinking is safe
//!     Rust and a stale link can never alias a new node.
//!   - BucketArray<K, V>: a boxed slice of chains allocated once at a
//!     power-of-two capacity; every access is bounds-checked and returns
//!     `IndexOutOfRange` instead of clamping.
//!   - HashStrategy<K>: `index(key, size) -> [0, size)`. `GoldenRatio`
//!     (multiplicative hashing over a deterministic `Digest`) is the default;
//!     any `Fn(&K, usize) -> usize` also qualifies.
//!   - HashTable<K, V, S>: owns one BucketArray and one strategy, keeps the
//!     entry count, and runs the grow/shrink policy.
//!
//! Constraints
//! - Single-threaded: mutation takes `&mut self`; callers sharing a table
//!   across threads wrap the whole table in a lock.
//! - Capacity is a power of two, never below `MIN_CAPACITY` (8).
//! - Unique keys: inserting an existing key overwrites its value in place.
//! - At most one resize per `insert`/`remove`, evaluated after the count is
//!   updated. Growth doubles when the table is full; shrink halves when the
//!   load drops to a quarter.
//!
//! Rehashing invariants
//! - A resize plans every destination index against the new array before
//!   the old array is swapped out. A strategy that panics or returns an
//!   out-of-range index leaves the table in its previous state.
//! - Entries are moved in old traversal order (bucket 0 upward, each chain
//!   head-to-tail), so colliding keys keep their relative order.
//!
//! Notes and non-goals
//! - No persistence and no global iteration order beyond per-chain order.
//! - Resizes are reported through `tracing` at debug level; the crate never
//!   installs a subscriber.

pub mod bucket_array;
pub mod capacity;
pub mod chain;
mod error;
pub mod hash_table;
mod hash_table_proptest;
pub mod strategy;

// Public surface
pub use capacity::{Capacity, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use error::{CapacityError, IndexOutOfRange};
pub use hash_table::HashTable;
pub use strategy::{Digest, GoldenRatio, HashStrategy};
