//! Structural equality between two tries.
//!
//! Grounded on `map_eq` in the original C extension: short-circuit on
//! size, then walk one map's entries and look each up in the other,
//! comparing values. No reliance on canonical form or matching tree
//! shape — this works even if the two tries were built in different
//! orders and happen to be shaped differently (they shouldn't be,
//! promotion/demotion thresholds are deterministic, but equality
//! doesn't need to assume that).

use crate::hashing::HamtHash;
use crate::iter::Iter;
use crate::node::Node;
use crate::ops::find::find_recursive;
use crate::ptr::PtrKind;

/// `true` iff `left` and `right` hold the same key-value pairs.
///
/// `left_len`/`right_len` let the caller pass an already-tracked size
/// instead of counting entries here.
pub fn structural_eq<K, V, P>(left: &Node<K, V, P>, left_len: usize, right: &Node<K, V, P>, right_len: usize) -> bool
where
    K: HamtHash + Eq,
    V: PartialEq,
    P: PtrKind,
{
    if left_len != right_len {
        return false;
    }
    for (key, value) in Iter::new(left) {
        let hash = key.hamt_hash();
        match find_recursive(right, hash, key, 0) {
            Some(other_value) if other_value == value => {}
            _ => return false,
        }
    }
    true
}
