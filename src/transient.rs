//! Transient batch-mutation handle.
//!
//! A transient borrows a map's tree and edits it in place for as long as
//! it alone owns the nodes it touches, then hands back a fresh
//! persistent map on [`finish`](TransientRepr::finish). This is the
//! generalization of the teacher's `checkpoint`/`rollback` pair onto a
//! structurally-shared tree: instead of one arena with a single undo
//! log, each transient gets its own `mutid` generation tag, and a node
//! is edited in place only while it carries that tag *and* this
//! transient is its sole owner (see [`crate::ops::owned_mut`]).
//!
//! Every other map or transient's nodes are untouched regardless of how
//! many edits this transient performs, since path-copying only ever
//! stamps *newly allocated* nodes with the live `mutid`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::adhash;
use crate::error::HamtError;
use crate::hashing::HamtHash;
use crate::iter::Iter;
use crate::map::MapRepr;
use crate::node::Node;
use crate::ops::assoc::{assoc, AssocOutcome};
use crate::ops::find::find_recursive;
use crate::ops::without::{without, Removed};
use crate::ptr::{ArcK, PtrKind, RcK};

static NEXT_MUTID: AtomicU64 = AtomicU64::new(1);

/// Allocates a fresh, process-wide unique, nonzero generation tag.
pub(crate) fn next_mutid() -> u64 {
    NEXT_MUTID.fetch_add(1, Ordering::Relaxed)
}

/// Shared implementation behind [`Transient`] and [`TransientSync`].
///
/// Generic over [`PtrKind`] the same way [`crate::node`] and
/// [`crate::ops`] are, so the mutation algorithm is written once for
/// both the `Rc` and `Arc` map flavors.
pub struct TransientRepr<K, V, P: PtrKind> {
    pub(crate) root: P::Rc<Node<K, V, P>>,
    pub(crate) mutid: u64,
    pub(crate) size: usize,
    pub(crate) adhash_accum: u32,
    finished: bool,
}

impl<K, V, P: PtrKind> TransientRepr<K, V, P> {
    pub(crate) fn new(root: P::Rc<Node<K, V, P>>, mutid: u64, size: usize, adhash_accum: u32) -> Self {
        Self { root, mutid, size, adhash_accum, finished: false }
    }

    fn check_live(&self) -> Result<(), HamtError> {
        if self.finished {
            Err(HamtError::AlreadyFinalized)
        } else {
            Ok(())
        }
    }
}

impl<K, V, P: PtrKind> TransientRepr<K, V, P>
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

    /// Returns the number of key-value pairs currently held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the transient currently holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs in their current state.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(&self.root)
    }
}

impl<K, V, P: PtrKind> TransientRepr<K, V, P>
where
    K: HamtHash + Eq + Clone,
    V: HamtHash + Clone + PartialEq,
{
    /// Associates `key` with `value`, editing in place where possible.
    ///
    /// Returns the previous value, if any (including when `value` is
    /// equal to what was already stored, in which case nothing is
    /// actually touched).
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, HamtError> {
        self.check_live()?;
        let key_for_contrib = key.clone();
        let hash = key.hamt_hash();
        let new_contribution = adhash::entry_contribution(&key_for_contrib, &value);
        match assoc(&mut self.root, self.mutid, hash, key, value, 0) {
            AssocOutcome::Inserted => {
                self.size += 1;
                self.adhash_accum ^= new_contribution;
                Ok(None)
            }
            AssocOutcome::Replaced(old) => {
                let old_contribution = adhash::entry_contribution(&key_for_contrib, &old);
                self.adhash_accum ^= old_contribution ^ new_contribution;
                Ok(Some(old))
            }
            AssocOutcome::Unchanged(old) => Ok(Some(old)),
        }
    }

    /// Removes `key`, editing in place where possible.
    ///
    /// Returns the removed value, if any.
    pub fn delete(&mut self, key: &K) -> Result<Option<V>, HamtError> {
        self.check_live()?;
        let hash = key.hamt_hash();
        let Some(old_value) = find_recursive(&self.root, hash, key, 0).cloned() else {
            return Ok(None);
        };
        match without(&mut self.root, self.mutid, hash, key, 0) {
            Removed::NotFound => Ok(None),
            Removed::Emptied => {
                self.root = P::new(Node::empty(self.mutid));
                self.size -= 1;
                self.adhash_accum ^= adhash::entry_contribution(key, &old_value);
                Ok(Some(old_value))
            }
            Removed::Shrunk => {
                self.size -= 1;
                self.adhash_accum ^= adhash::entry_contribution(key, &old_value);
                Ok(Some(old_value))
            }
        }
    }

    /// Removes and returns `key`'s value, or [`HamtError::KeyNotFound`] if
    /// absent.
    pub fn pop(&mut self, key: &K) -> Result<V, HamtError> {
        self.delete(key)?.ok_or(HamtError::KeyNotFound)
    }

    /// Applies `f` to the value at `key`, inserting `default` first if the
    /// key is absent.
    pub fn update_with<F>(&mut self, key: K, default: V, f: F) -> Result<(), HamtError>
    where
        F: FnOnce(&mut V),
    {
        self.check_live()?;
        let mut value = self.get(&key).cloned().unwrap_or(default);
        f(&mut value);
        self.set(key, value)?;
        Ok(())
    }

    /// Inserts every pair from `entries`, overwriting existing keys.
    pub fn update<I>(&mut self, entries: I) -> Result<(), HamtError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.check_live()?;
        for (k, v) in entries {
            self.set(k, v)?;
        }
        Ok(())
    }

    /// Finalizes the transient and returns a fresh persistent map holding
    /// its current contents.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::AlreadyFinalized`] if called twice.
    pub fn finish(&mut self) -> Result<MapRepr<K, V, P>, HamtError> {
        self.check_live()?;
        self.finished = true;
        Ok(MapRepr::from_transient_parts(self.root.clone(), self.size, self.adhash_accum))
    }
}

/// Batch-mutation handle over a single-threaded [`crate::HamtMap`].
pub type Transient<K, V> = TransientRepr<K, V, RcK>;

/// Batch-mutation handle over a multi-threaded [`crate::HamtMapSync`].
pub type TransientSync<K, V> = TransientRepr<K, V, ArcK>;
