//! HAMT node types and bitmap/fragment helpers.
//!
//! Three node variants maintain the invariants laid out in the crate's
//! design notes: a [`Bitmap`](Node::Bitmap) node for occupancy `<= 16`, an
//! [`Array`](Node::Array) node once occupancy exceeds that (`>= 17`), and a
//! [`Collision`](Node::Collision) node once the full 32-bit hash has been
//! consumed and distinct keys still collide.

use crate::hashing::HamtHash;
use crate::ptr::PtrKind;

/// Bits consumed per trie level (5 -> 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// The shift of the last bitmap/array level. Beyond this, the 32-bit hash
/// is exhausted and only a [`Node::Collision`] can distinguish keys.
pub const MAX_SHIFT: u32 = 30;

/// An Array node is used once a level holds more than this many subtrees.
pub const ARRAY_PROMOTE_AT: usize = 17;

/// An Array node demotes back to a Bitmap once its count drops to this.
pub const ARRAY_DEMOTE_AT: usize = 16;

/// Returns the shift of the next trie level, or `None` if `shift` is
/// already the last bitmap/array level (hash fully consumed).
#[must_use]
pub const fn next_shift(shift: u32) -> Option<u32> {
    let next = shift + BITS_PER_LEVEL;
    if next > MAX_SHIFT { None } else { Some(next) }
}

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    if shift >= 32 { 0 } else { (hash >> shift) & 0x1F }
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn bitpos(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compacted slot index of `bit` within `bitmap` — the number
/// of set bits below `bit` (popcount of `bitmap & (bit - 1)`).
#[inline]
#[must_use]
pub const fn compact_index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// A Bitmap slot is either a direct leaf or a pointer to a subtree.
pub enum Slot<K, V, P: PtrKind> {
    /// `key != None` in the spec's terms: a direct `(key, value)` leaf.
    Leaf(K, V),
    /// `key == None`: the slot holds a child subtree.
    Sub(P::Rc<Node<K, V, P>>),
}

impl<K: Clone, V: Clone, P: PtrKind> Clone for Slot<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(k, v) => Self::Leaf(k.clone(), v.clone()),
            Self::Sub(n) => Self::Sub(n.clone()),
        }
    }
}

/// A HAMT node, tagged with the `mutid` of the transient that may edit it
/// in place (`0` for persistent nodes, which are always cloned-on-write).
pub enum Node<K, V, P: PtrKind> {
    /// Bitmap-compressed node. `bitmap`'s popcount equals `slots.len()`.
    Bitmap {
        /// 32-bit occupancy bitmap.
        bitmap: u32,
        /// One entry per set bit, in ascending bit order.
        slots: Vec<Slot<K, V, P>>,
        /// Generation tag; see [`crate::transient`].
        mutid: u64,
    },
    /// Full 32-wide node holding only subtree pointers, used once a level's
    /// occupancy exceeds 16.
    Array {
        /// Exactly 32 slots; absent children are `None`.
        children: Vec<Option<P::Rc<Node<K, V, P>>>>,
        /// Number of non-`None` entries in `children`.
        count: u16,
        /// Generation tag; see [`crate::transient`].
        mutid: u64,
    },
    /// Terminal node for keys sharing the same full 32-bit hash.
    Collision {
        /// The shared hash of every pair in `pairs`.
        hash: u32,
        /// At least two `(key, value)` pairs.
        pairs: Vec<(K, V)>,
        /// Generation tag; see [`crate::transient`].
        mutid: u64,
    },
}

impl<K, V, P: PtrKind> Node<K, V, P> {
    /// The generation tag stamped on this node.
    #[must_use]
    pub const fn mutid(&self) -> u64 {
        match self {
            Self::Bitmap { mutid, .. } | Self::Array { mutid, .. } | Self::Collision { mutid, .. } => *mutid,
        }
    }

    /// Creates an empty Bitmap node tagged with `mutid`.
    #[must_use]
    pub const fn empty(mutid: u64) -> Self {
        Self::Bitmap { bitmap: 0, slots: Vec::new(), mutid }
    }

    /// Returns `true` for an empty Bitmap node (the only node that may be
    /// empty; it appears only as the root of an empty map).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Bitmap { bitmap: 0, .. })
    }
}

/// Builds a two-entry subtree from two distinct keys that collide at
/// `shift`, descending further if their fragments also collide, until the
/// hash is exhausted and a [`Node::Collision`] is produced.
///
/// Mirrors [`crate::ops::assoc`]'s recursive split, but operates on two
/// freshly-built entries rather than path-copying an existing tree.
#[allow(clippy::too_many_arguments)]
pub fn split_two<K, V, P>(
    mutid: u64,
    h1: u32,
    k1: K,
    v1: V,
    h2: u32,
    k2: K,
    v2: V,
    shift: u32,
) -> Node<K, V, P>
where
    K: HamtHash + Eq,
    P: PtrKind,
{
    if h1 == h2 {
        return Node::Collision { hash: h1, pairs: vec![(k1, v1), (k2, v2)], mutid };
    }

    let f1 = fragment(h1, shift);
    let f2 = fragment(h2, shift);

    if f1 == f2 {
        let Some(next) = next_shift(shift) else {
            unreachable!("distinct 32-bit hashes cannot collide at every fragment")
        };
        let child = split_two(mutid, h1, k1, v1, h2, k2, v2, next);
        Node::Bitmap { bitmap: bitpos(f1), slots: vec![Slot::Sub(P::new(child))], mutid }
    } else {
        let (first, second) = if f1 < f2 { ((f1, k1, v1), (f2, k2, v2)) } else { ((f2, k2, v2), (f1, k1, v1)) };
        Node::Bitmap {
            bitmap: bitpos(first.0) | bitpos(second.0),
            slots: vec![Slot::Leaf(first.1, first.2), Slot::Leaf(second.1, second.2)],
            mutid,
        }
    }
}
