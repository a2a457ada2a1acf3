//! Canonical, order-independent structural hash ("AdHash").
//!
//! Two maps holding the same entries hash identically no matter what
//! order they were built in, since every entry's contribution is
//! XOR-accumulated into a single running total. Grounded on
//! `map_py_hash`/`_shuffle_bits` in the original C extension (itself an
//! adaptation of `frozenset.__hash__`), carried over magic constant for
//! magic constant and, crucially, at the same 32-bit width: the mix
//! operates on the same folded 32-bit hash every other part of the
//! engine uses (see [`crate::hashing::hash_key`]), with all arithmetic
//! wrapping at 32 bits, rather than widening to 64 bits and producing a
//! value the rest of the crate's 32-bit world never actually computes.
//!
//! Maps maintain this incrementally: each `set`/`delete` XORs the
//! affected entry's contribution in or out rather than rehashing
//! everything, giving O(1) amortized [`crate::HamtMap::hash_contents`].

use crate::hashing::{HamtHash, SENTINEL};

const SHUFFLE_XOR: u32 = 89_869_747;
const SHUFFLE_MUL: u32 = 3_644_798_167;
const COUNT_MUL: u32 = 1_927_868_237;
const FINAL_MUL: u32 = 69069;
const FINAL_ADD: u32 = 907_133_923;

/// The `_shuffle_bits` mixing step, applied once per key and once per
/// value before XORing into the running accumulator.
#[must_use]
pub const fn shuffle(h: u32) -> u32 {
    ((h ^ SHUFFLE_XOR) ^ (h << 16)).wrapping_mul(SHUFFLE_MUL)
}

/// One entry's contribution to the running `AdHash` accumulator.
///
/// XOR this into the accumulator on insert, and XOR it back out again
/// on delete or on overwrite of the same key with a different value.
#[must_use]
pub fn entry_contribution<K, V>(key: &K, value: &V) -> u32
where
    K: HamtHash,
    V: HamtHash,
{
    shuffle(key.hamt_hash()) ^ shuffle(value.hamt_hash())
}

/// Folds the accumulated per-entry XOR and the entry count into a
/// single, order-independent structural hash.
#[must_use]
pub const fn finish(accumulated: u32, len: usize) -> u32 {
    let mut hash = accumulated ^ (len as u32).wrapping_mul(2).wrapping_add(1).wrapping_mul(COUNT_MUL);
    hash ^= (hash >> 11) ^ (hash >> 25);
    hash = hash.wrapping_mul(FINAL_MUL).wrapping_add(FINAL_ADD);
    if hash == SENTINEL {
        hash.wrapping_add(1)
    } else {
        hash
    }
}
