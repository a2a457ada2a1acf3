//! Persistent hash array mapped trie (HAMT) with a transient
//! batch-mutation handle.
//!
//! A HAMT is a trie over a key's hash, branching 32-wide per level via a
//! popcount-compressed bitmap node, with promotion to a full 32-wide
//! array node once a level's occupancy grows past it and a dedicated
//! collision node for keys whose full hash matches exactly. Structural
//! sharing (clone-on-write path copying) makes every [`HamtMap::set`]/
//! [`HamtMap::delete`] O(log₃₂ n) in both time and new allocation while
//! leaving every other snapshot of the map untouched and still valid.
//!
//! # Key properties
//!
//! - **Persistent by default**: [`HamtMap::set`]/[`HamtMap::delete`]
//!   return a new map; the receiver is untouched.
//! - **Transient escape hatch**: [`HamtMap::transient`] opens a
//!   [`Transient`] handle that edits in place while it alone owns the
//!   nodes it touches, for batch updates that would otherwise allocate
//!   one new path per edit.
//! - **O(1)-amortized structural hash**: [`HamtMap::hash_contents`] is
//!   maintained incrementally rather than recomputed from scratch.
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`.
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod adhash;
pub mod equality;
pub mod error;
pub mod hashing;
pub mod iter;
pub mod node;
pub mod ops;
pub mod ptr;
pub mod transient;
pub mod update;

mod map;
mod map_sync;

#[cfg(test)]
mod tests;

pub use error::HamtError;
pub use map::HamtMap;
pub use map_sync::HamtMapSync;
pub use transient::{Transient, TransientSync};
