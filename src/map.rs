//! Persistent hash array mapped trie, single-threaded.
//!
//! [`HamtMap`] is the `Rc`-backed flavor: cheap to clone, cheap to
//! branch into independent snapshots, but not `Send`/`Sync`. See
//! [`crate::map_sync`] for the thread-safe counterpart.
//!
//! The generic [`MapRepr`] underneath carries the actual logic, shared
//! between both flavors the same way [`crate::node`] and [`crate::ops`]
//! are generalized over [`PtrKind`] — this mirrors the teacher's own
//! `map.rs`/`map_sync.rs` pair, just with the duplicated trait-impl
//! block factored out once instead of copied twice.

use std::fmt;
use std::ops;

use crate::adhash;
use crate::equality::structural_eq;
use crate::error::HamtError;
use crate::hashing::HamtHash;
use crate::iter::{Iter, Keys, Values};
use crate::node::Node;
use crate::ops::assoc::{assoc, AssocOutcome};
use crate::ops::find::find_recursive;
use crate::ops::without::{without, Removed};
use crate::ptr::{PtrKind, RcK};
use crate::transient::{next_mutid, TransientRepr};

/// Persistent map holding its tree behind a [`PtrKind`]-chosen pointer.
///
/// Same set of key-value pairs always produces the same trie shape
/// (Bitmap/Array promotion and demotion thresholds are deterministic),
/// which is what makes [`Self::hash_contents`] a cheap O(1)-amortized
/// structural hash instead of a full entry-by-entry rehash.
pub struct MapRepr<K, V, P: PtrKind> {
    root: P::Rc<Node<K, V, P>>,
    size: usize,
    adhash_accum: u32,
}

impl<K, V, P: PtrKind> MapRepr<K, V, P> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { root: P::new(Node::empty(0)), size: 0, adhash_accum: 0 }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `true` iff `self` and `other` share the very same root allocation.
    ///
    /// Exposed for tests asserting the idempotence law `set(m, k, lookup(m,
    /// k)) === m` at the pointer level, not just structurally.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn root_ptr_eq(&self, other: &Self) -> bool {
        P::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(&self.root)
    }

    /// Returns an iterator over `&K` keys.
    #[must_use]
    pub fn iter_keys(&self) -> Keys<'_, K, V, P> {
        Keys::new(&self.root)
    }

    /// Returns an iterator over `&V` values.
    #[must_use]
    pub fn iter_values(&self) -> Values<'_, K, V, P> {
        Values::new(&self.root)
    }
}

impl<K, V, P: PtrKind> MapRepr<K, V, P>
where
    K: HamtHash + Eq,
    V: HamtHash,
{
    /// Returns the canonical, order-independent structural hash of this
    /// map's contents.
    ///
    /// Two maps with the same [`Self::hash_contents`] and the same
    /// [`Self::len`] hold the same entries with overwhelming probability.
    #[must_use]
    pub fn hash_contents(&self) -> u32 {
        adhash::finish(self.adhash_accum, self.size)
    }
}

impl<K, V, P: PtrKind> MapRepr<K, V, P>
where
    K: HamtHash + Eq,
{
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        find_recursive(&self.root, key.hamt_hash(), key, 0)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the value associated with `key`, raising
    /// [`HamtError::KeyNotFound`] if it is absent.
    pub fn lookup(&self, key: &K) -> Result<&V, HamtError> {
        self.get(key).ok_or(HamtError::KeyNotFound)
    }
}

impl<K, V, P: PtrKind> MapRepr<K, V, P>
where
    K: HamtHash + Eq + Clone,
    V: HamtHash + Clone + PartialEq,
{
    /// Returns a new map with `key` associated to `value`, leaving `self`
    /// untouched.
    ///
    /// Returns `self`'s own sharing unchanged if `key` already held an
    /// equal `value` (no new allocation happens along a path that never
    /// diverges): `set(m, k, lookup(m, k)) === m`.
    #[must_use]
    pub fn set(&self, key: K, value: V) -> Self {
        let key_for_contrib = key.clone();
        let mut root = self.root.clone();
        let hash = key.hamt_hash();
        let new_contribution = adhash::entry_contribution(&key_for_contrib, &value);
        match assoc::<K, V, P>(&mut root, 0, hash, key, value, 0) {
            AssocOutcome::Inserted => Self { root, size: self.size + 1, adhash_accum: self.adhash_accum ^ new_contribution },
            AssocOutcome::Replaced(old_value) => {
                let old_contribution = adhash::entry_contribution(&key_for_contrib, &old_value);
                Self { root, size: self.size, adhash_accum: self.adhash_accum ^ old_contribution ^ new_contribution }
            }
            AssocOutcome::Unchanged(_) => Self { root: self.root.clone(), size: self.size, adhash_accum: self.adhash_accum },
        }
    }

    /// Returns a new map with `key` removed, leaving `self` untouched.
    ///
    /// Raises [`HamtError::KeyNotFound`] if `key` is absent.
    pub fn delete(&self, key: &K) -> Result<Self, HamtError> {
        let Some(old_value) = self.get(key) else {
            return Err(HamtError::KeyNotFound);
        };
        let contribution = adhash::entry_contribution(key, old_value);
        let mut root = self.root.clone();
        let hash = key.hamt_hash();
        Ok(match without::<K, V, P>(&mut root, 0, hash, key, 0) {
            Removed::NotFound => unreachable!("get() above already confirmed the key is present"),
            Removed::Emptied => Self { root: P::new(Node::empty(0)), size: self.size - 1, adhash_accum: self.adhash_accum ^ contribution },
            Removed::Shrunk => Self { root, size: self.size - 1, adhash_accum: self.adhash_accum ^ contribution },
        })
    }

    /// Alias for [`Self::delete`].
    pub fn remove(&self, key: &K) -> Result<Self, HamtError> {
        self.delete(key)
    }

    /// Opens a batch-mutation handle seeded with this map's current
    /// contents.
    ///
    /// Edits made through the returned handle happen in place as long as
    /// it alone owns the nodes it touches; [`TransientRepr::finish`]
    /// hands back a fresh persistent map without disturbing `self`.
    #[must_use]
    pub fn transient(&self) -> TransientRepr<K, V, P> {
        TransientRepr::new(self.root.clone(), next_mutid(), self.size, self.adhash_accum)
    }

    /// Builds a persistent map directly from a finished transient's
    /// `(root, size, hash)` triple.
    #[must_use]
    pub(crate) fn from_transient_parts(root: P::Rc<Node<K, V, P>>, size: usize, adhash_accum: u32) -> Self {
        Self { root, size, adhash_accum }
    }
}

impl<K, V, P: PtrKind> Default for MapRepr<K, V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P: PtrKind> Clone for MapRepr<K, V, P> {
    fn clone(&self) -> Self {
        Self { root: self.root.clone(), size: self.size, adhash_accum: self.adhash_accum }
    }
}

impl<K, V, P: PtrKind> fmt::Debug for MapRepr<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HamtMap")
            .field("len", &self.size)
            .field("hash_contents", &format_args!("{:#010x}", self.hash_contents_debug()))
            .finish_non_exhaustive()
    }
}

impl<K, V, P: PtrKind> MapRepr<K, V, P> {
    fn hash_contents_debug(&self) -> u32 {
        adhash::finish(self.adhash_accum, self.size)
    }
}

impl<K, V, P: PtrKind> PartialEq for MapRepr<K, V, P>
where
    K: HamtHash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        structural_eq(&self.root, self.size, &other.root, other.size)
    }
}

impl<K, V, P: PtrKind> Eq for MapRepr<K, V, P>
where
    K: HamtHash + Eq,
    V: Eq,
{
}

impl<K, V, P: PtrKind> Extend<(K, V)> for MapRepr<K, V, P>
where
    K: HamtHash + Eq + Clone,
    V: HamtHash + Clone + PartialEq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            *self = self.set(k, v);
        }
    }
}

impl<K, V, P: PtrKind> FromIterator<(K, V)> for MapRepr<K, V, P>
where
    K: HamtHash + Eq + Clone,
    V: HamtHash + Clone + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, P: PtrKind> ops::Index<&K> for MapRepr<K, V, P>
where
    K: HamtHash + Eq,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, P: PtrKind> IntoIterator for &'a MapRepr<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        self.iter()
    }
}

/// Persistent map, single-threaded (`Rc`-backed).
pub type HamtMap<K, V> = MapRepr<K, V, RcK>;
