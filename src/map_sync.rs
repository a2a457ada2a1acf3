//! Persistent hash array mapped trie, multi-threaded.
//!
//! Identical API to [`HamtMap`](crate::HamtMap), backed by
//! [`std::sync::Arc`] instead of [`std::rc::Rc`] so the map itself is
//! `Send + Sync` whenever `K` and `V` are. See [`crate::map`] for the
//! shared implementation both flavors delegate to.

use crate::map::MapRepr;
use crate::ptr::ArcK;

/// Persistent map, thread-safe (`Arc`-backed).
pub type HamtMapSync<K, V> = MapRepr<K, V, ArcK>;
