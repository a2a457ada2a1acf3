//! Read-only lookup. No cloning, no allocation — a pure recursive descent.

use crate::node::{bitpos, compact_index, fragment, next_shift, Node, Slot};
use crate::ptr::PtrKind;

/// Looks up `key` (already hashed to `hash`) under `node` starting at `shift`.
pub fn find_recursive<'a, K, V, P>(node: &'a Node<K, V, P>, hash: u32, key: &K, shift: u32) -> Option<&'a V>
where
    K: Eq,
    P: PtrKind,
{
    match node {
        Node::Bitmap { bitmap, slots, .. } => {
            let bit = bitpos(fragment(hash, shift));
            if bitmap & bit == 0 {
                return None;
            }
            match &slots[compact_index(*bitmap, bit)] {
                Slot::Leaf(k, v) => (k == key).then_some(v),
                Slot::Sub(child) => {
                    let next = next_shift(shift).expect("a Sub slot implies a level remains");
                    find_recursive(child, hash, key, next)
                }
            }
        }
        Node::Array { children, .. } => match &children[fragment(hash, shift) as usize] {
            None => None,
            Some(child) => {
                let next = next_shift(shift).expect("an Array node never occupies the last level");
                find_recursive(child, hash, key, next)
            }
        },
        Node::Collision { hash: node_hash, pairs, .. } => {
            if *node_hash != hash {
                return None;
            }
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }
    }
}

/// `true` iff `key` is present under `node`.
#[must_use]
pub fn contains_recursive<K, V, P>(node: &Node<K, V, P>, hash: u32, key: &K, shift: u32) -> bool
where
    K: Eq,
    P: PtrKind,
{
    find_recursive(node, hash, key, shift).is_some()
}
