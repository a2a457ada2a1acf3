//! Persistent/transient removal (`delete`), with canonical-form
//! maintenance: single-entry subtrees are inlined back into their
//! parent's Bitmap slot, Array nodes demote back to Bitmap once their
//! occupancy drops to 16, and a two-entry Collision node demotes to a
//! one-entry Bitmap.
//!
//! Grounded on `map_node_bitmap_without` / `map_node_array_without` /
//! `map_node_collision_without` in the original C extension.

use super::owned_mut;
use crate::node::{bitpos, compact_index, fragment, next_shift, Node, Slot, ARRAY_DEMOTE_AT};
use crate::ptr::PtrKind;

/// Outcome of a removal attempt at one level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    /// The key was not present under this node.
    NotFound,
    /// The key was removed; `rc` now holds the (possibly reshaped)
    /// replacement subtree.
    Shrunk,
    /// The key was removed and this node now holds nothing. The caller
    /// must drop the slot that pointed to `rc` entirely, since an
    /// empty non-root node is never kept in the tree.
    Emptied,
}

/// Removes `key` (hashed to `hash`) from under `rc`, rooted at `shift`.
pub fn without<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: &K, shift: u32) -> Removed
where
    K: Eq + Clone,
    V: Clone,
    P: PtrKind,
{
    match &**rc {
        Node::Bitmap { .. } => without_bitmap(rc, mutid, hash, key, shift),
        Node::Array { .. } => without_array(rc, mutid, hash, key, shift),
        Node::Collision { .. } => without_collision(rc, mutid, hash, key, shift),
    }
}

fn without_bitmap<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: &K, shift: u32) -> Removed
where
    K: Eq + Clone,
    V: Clone,
    P: PtrKind,
{
    let bit = bitpos(fragment(hash, shift));
    let bitmap = match &**rc {
        Node::Bitmap { bitmap, .. } => *bitmap,
        _ => unreachable!("without_bitmap called on a non-Bitmap node"),
    };
    if bitmap & bit == 0 {
        return Removed::NotFound;
    }
    let idx = compact_index(bitmap, bit);
    let is_sub = matches!(&**rc, Node::Bitmap { slots, .. } if matches!(slots[idx], Slot::Sub(_)));

    if is_sub {
        let next = next_shift(shift).expect("a Sub slot implies a level remains");
        let outcome = {
            let node = owned_mut(rc, mutid);
            let Node::Bitmap { slots, .. } = node else { unreachable!() };
            let Slot::Sub(child) = &mut slots[idx] else { unreachable!() };
            without(child, mutid, hash, key, next)
        };
        match outcome {
            Removed::NotFound => Removed::NotFound,
            Removed::Emptied => {
                unreachable!("a Bitmap node always inlines single-entry subtrees before they can empty")
            }
            Removed::Shrunk => {
                let inline_pair = match &**rc {
                    Node::Bitmap { slots, .. } => match &slots[idx] {
                        Slot::Sub(child) => match &**child {
                            Node::Bitmap { bitmap, slots, .. } if bitmap.count_ones() == 1 => match &slots[0] {
                                Slot::Leaf(k, v) => Some((k.clone(), v.clone())),
                                Slot::Sub(_) => None,
                            },
                            _ => None,
                        },
                        Slot::Leaf(..) => unreachable!(),
                    },
                    _ => unreachable!(),
                };
                if let Some((k, v)) = inline_pair {
                    let node = owned_mut(rc, mutid);
                    let Node::Bitmap { slots, .. } = node else { unreachable!() };
                    slots[idx] = Slot::Leaf(k, v);
                }
                Removed::Shrunk
            }
        }
    } else {
        let matches_key = matches!(&**rc, Node::Bitmap { slots, .. } if matches!(&slots[idx], Slot::Leaf(k, _) if k == key));
        if !matches_key {
            return Removed::NotFound;
        }
        if bitmap.count_ones() == 1 {
            return Removed::Emptied;
        }
        let node = owned_mut(rc, mutid);
        let Node::Bitmap { bitmap, slots, .. } = node else { unreachable!() };
        slots.remove(idx);
        *bitmap &= !bit;
        Removed::Shrunk
    }
}

fn without_array<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: &K, shift: u32) -> Removed
where
    K: Eq + Clone,
    V: Clone,
    P: PtrKind,
{
    let frag = fragment(hash, shift) as usize;
    let next = next_shift(shift).expect("Array nodes never occupy the last level");
    let has_child = matches!(&**rc, Node::Array { children, .. } if children[frag].is_some());
    if !has_child {
        return Removed::NotFound;
    }

    let outcome = {
        let node = owned_mut(rc, mutid);
        let Node::Array { children, .. } = node else { unreachable!() };
        let child = children[frag].as_mut().expect("checked above");
        without(child, mutid, hash, key, next)
    };

    match outcome {
        Removed::NotFound | Removed::Shrunk => outcome,
        Removed::Emptied => {
            let (remaining, snapshot) = match &**rc {
                Node::Array { children, count, .. } => (*count as usize - 1, children.clone()),
                _ => unreachable!(),
            };
            if remaining == 0 {
                return Removed::Emptied;
            }
            if remaining >= ARRAY_DEMOTE_AT {
                let node = owned_mut(rc, mutid);
                let Node::Array { children, count, .. } = node else { unreachable!() };
                children[frag] = None;
                *count -= 1;
            } else {
                demote_to_bitmap(rc, mutid, frag, &snapshot);
            }
            Removed::Shrunk
        }
    }
}

/// Rebuilds a shrinking Array node as a Bitmap node, skipping `skip` and
/// inlining any remaining child that is itself a single-entry Bitmap.
fn demote_to_bitmap<K, V, P>(
    rc: &mut P::Rc<Node<K, V, P>>,
    mutid: u64,
    skip: usize,
    children: &[Option<P::Rc<Node<K, V, P>>>],
) where
    K: Clone,
    V: Clone,
    P: PtrKind,
{
    let mut bitmap = 0u32;
    let mut slots = Vec::with_capacity(children.len());
    for (i, child) in children.iter().enumerate() {
        if i == skip {
            continue;
        }
        let Some(child) = child else { continue };
        bitmap |= 1 << i;
        let slot = match &**child {
            Node::Bitmap { bitmap: child_bitmap, slots: child_slots, .. }
                if child_bitmap.count_ones() == 1 && matches!(child_slots[0], Slot::Leaf(..)) =>
            {
                let Slot::Leaf(k, v) = &child_slots[0] else { unreachable!() };
                Slot::Leaf(k.clone(), v.clone())
            }
            _ => Slot::Sub(child.clone()),
        };
        slots.push(slot);
    }
    *rc = P::new(Node::Bitmap { bitmap, slots, mutid });
}

fn without_collision<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: &K, shift: u32) -> Removed
where
    K: Eq + Clone,
    V: Clone,
    P: PtrKind,
{
    let node_hash = match &**rc {
        Node::Collision { hash, .. } => *hash,
        _ => unreachable!("without_collision called on a non-Collision node"),
    };
    if node_hash != hash {
        return Removed::NotFound;
    }

    let idx = match &**rc {
        Node::Collision { pairs, .. } => pairs.iter().position(|(k, _)| k == key),
        _ => unreachable!(),
    };
    let Some(idx) = idx else {
        return Removed::NotFound;
    };

    let len = match &**rc {
        Node::Collision { pairs, .. } => pairs.len(),
        _ => unreachable!(),
    };
    if len == 1 {
        return Removed::Emptied;
    }
    if len == 2 {
        let other = match &**rc {
            Node::Collision { pairs, .. } => pairs[1 - idx].clone(),
            _ => unreachable!(),
        };
        let bit = bitpos(fragment(hash, shift));
        *rc = P::new(Node::Bitmap { bitmap: bit, slots: vec![Slot::Leaf(other.0, other.1)], mutid });
        return Removed::Shrunk;
    }

    let node = owned_mut(rc, mutid);
    let Node::Collision { pairs, .. } = node else { unreachable!() };
    pairs.remove(idx);
    Removed::Shrunk
}
