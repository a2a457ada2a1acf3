//! Key hashing: folds a host hash down to the internal 32-bit width.
//!
//! The tree is shaped entirely by this 32-bit value. Changing the fold
//! changes tree shape and would invalidate any test that pins a specific
//! shape (see `tests::boundaries`).
//!
//! Deliberately not generic over [`std::hash::BuildHasher`]: two
//! independently constructed maps must fold the same key to the same
//! 32-bit value for structural equality and the canonical-form
//! invariant to hold, which a randomized per-process hasher (such as
//! `std::hash::RandomState`) cannot guarantee. [`DefaultHasher`] has no
//! random seed, so it is deterministic across maps and across a
//! process's lifetime.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Reserved "error" sentinel. Any hash that collides with it is remapped.
pub const SENTINEL: u32 = u32::MAX;

/// The value a colliding hash is remapped to.
const SENTINEL_REPLACEMENT: u32 = u32::MAX - 1;

/// Hashes `value` and folds the result to 32 bits.
///
/// A 64-bit host hash is folded by XOR of its two halves, per the
/// original HAMT design this crate follows. `u32::MAX` is reserved, so a
/// fold that lands on it is nudged to `u32::MAX - 1`.
#[must_use]
pub fn hash_key<T: ?Sized + Hash>(value: &T) -> u32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    fold(hasher.finish())
}

/// Folds a 64-bit hash to 32 bits by XOR-ing the high and low halves.
#[must_use]
pub const fn fold(wide: u64) -> u32 {
    let folded = ((wide >> 32) as u32) ^ (wide as u32);
    if folded == SENTINEL {
        SENTINEL_REPLACEMENT
    } else {
        folded
    }
}

/// Computes the 32-bit hash the engine actually keys a trie on.
///
/// Every node algorithm (`find`, `assoc`, `without`) and [`crate::adhash`]
/// go through this trait rather than calling [`hash_key`] directly, so a
/// type that needs to pin its exact post-fold hash — a boundary test
/// driving the Bitmap->Array promotion threshold, say — can implement
/// [`HamtHash`] itself instead of relying on [`Hash`]/[`DefaultHasher`] to
/// preserve bits it was never contracted to preserve.
pub trait HamtHash {
    /// Returns this value's 32-bit engine hash.
    fn hamt_hash(&self) -> u32;
}

impl<T: ?Sized + Hash> HamtHash for T {
    fn hamt_hash(&self) -> u32 {
        hash_key(self)
    }
}
