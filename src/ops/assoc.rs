//! Persistent/transient insertion (`set`), with Bitmap -> Array promotion.
//!
//! Grounded on `map_node_bitmap_assoc` / `map_node_array_assoc` /
//! `map_node_collision_assoc` / `map_node_new_bitmap_or_collision` in the
//! original C extension this crate's data model follows. The `mutid`
//! in-place branch mirrors `self->b_mutid == mutid` there; here it is
//! additionally guarded by [`PtrKind::get_mut`] so a stale or aliased
//! `mutid` tag can never cause an in-place write to a shared node.
//!
//! Every branch that might overwrite an existing key peeks at the
//! stored value through a shared reference *before* calling
//! [`owned_mut`]: if the new value equals what's already there, the
//! whole call returns [`AssocOutcome::Unchanged`] without cloning or
//! touching any node on the path, root included (the idempotence law:
//! `set(m, k, lookup(m, k)) === m`).

use super::find::find_recursive;
use super::owned_mut;
use crate::hashing::HamtHash;
use crate::node::{bitpos, compact_index, fragment, next_shift, split_two, Node, Slot, ARRAY_PROMOTE_AT};
use crate::ptr::PtrKind;

/// Whether `assoc` added a new entry, replaced an existing one, or found
/// the key already mapped to an equal value.
///
/// `Replaced` carries the old value so the caller can fold it out of an
/// incrementally maintained structural hash (see [`crate::adhash`]).
/// `Unchanged` likewise carries the (identical) old value, so a caller
/// like [`crate::transient::TransientRepr::set`] can still report "the
/// key already held this value" accurately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssocOutcome<V> {
    /// The key was not present; the map's size grows by one.
    Inserted,
    /// The key was already present with a different value; the old
    /// value is returned here.
    Replaced(V),
    /// The key was already present with an equal value; nothing on the
    /// path was touched.
    Unchanged(V),
}

/// Associates `key` -> `value` under `rc`, rooted at `shift`.
///
/// When `mutid != 0` and the node at `rc` already carries that `mutid`
/// (and is not shared), the edit happens in place; otherwise the path
/// down to the edit is copied, and every newly allocated node along the
/// way is stamped with `mutid` so a later edit in the same transient
/// generation can reuse it.
pub fn assoc<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: K, value: V, shift: u32) -> AssocOutcome<V>
where
    K: HamtHash + Eq + Clone,
    V: Clone + PartialEq,
    P: PtrKind,
{
    match &**rc {
        Node::Bitmap { .. } => assoc_bitmap(rc, mutid, hash, key, value, shift),
        Node::Array { .. } => assoc_array(rc, mutid, hash, key, value, shift),
        Node::Collision { .. } => assoc_collision(rc, mutid, hash, key, value, shift),
    }
}

fn assoc_bitmap<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: K, value: V, shift: u32) -> AssocOutcome<V>
where
    K: HamtHash + Eq + Clone,
    V: Clone + PartialEq,
    P: PtrKind,
{
    let bit = bitpos(fragment(hash, shift));
    let bitmap = match &**rc {
        Node::Bitmap { bitmap, .. } => *bitmap,
        _ => unreachable!("assoc_bitmap called on a non-Bitmap node"),
    };

    if bitmap & bit == 0 {
        let count = bitmap.count_ones() as usize;
        if count + 1 >= ARRAY_PROMOTE_AT {
            promote_and_insert(rc, mutid, hash, key, value, shift);
        } else {
            let idx = compact_index(bitmap, bit);
            if let Node::Bitmap { bitmap, slots, .. } = owned_mut(rc, mutid) {
                slots.insert(idx, Slot::Leaf(key, value));
                *bitmap |= bit;
            }
        }
        return AssocOutcome::Inserted;
    }

    let idx = compact_index(bitmap, bit);
    let is_sub = matches!(&**rc, Node::Bitmap { slots, .. } if matches!(slots[idx], Slot::Sub(_)));

    if is_sub {
        let next = next_shift(shift).expect("a Sub slot implies a level remains");
        let unchanged = match &**rc {
            Node::Bitmap { slots, .. } => match &slots[idx] {
                Slot::Sub(child) => matches!(find_recursive(child, hash, &key, next), Some(v) if *v == value),
                Slot::Leaf(..) => unreachable!(),
            },
            _ => unreachable!(),
        };
        if unchanged {
            return AssocOutcome::Unchanged(value);
        }
        let node = owned_mut(rc, mutid);
        let Node::Bitmap { slots, .. } = node else { unreachable!() };
        let Slot::Sub(child) = &mut slots[idx] else { unreachable!() };
        return assoc(child, mutid, hash, key, value, next);
    }

    let same_key = matches!(&**rc, Node::Bitmap { slots, .. } if matches!(&slots[idx], Slot::Leaf(k, _) if *k == key));
    if same_key {
        let old_value = match &**rc {
            Node::Bitmap { slots, .. } => match &slots[idx] {
                Slot::Leaf(_, v) => v.clone(),
                Slot::Sub(_) => unreachable!(),
            },
            _ => unreachable!(),
        };
        if old_value == value {
            return AssocOutcome::Unchanged(old_value);
        }
        if let Node::Bitmap { slots, .. } = owned_mut(rc, mutid) {
            slots[idx] = Slot::Leaf(key, value);
        }
        return AssocOutcome::Replaced(old_value);
    }

    let (existing_key, existing_value) = match &**rc {
        Node::Bitmap { slots, .. } => match &slots[idx] {
            Slot::Leaf(k, v) => (k.clone(), v.clone()),
            Slot::Sub(_) => unreachable!(),
        },
        _ => unreachable!(),
    };
    let existing_hash = existing_key.hamt_hash();
    let next = next_shift(shift).expect("a second key at an occupied fragment always leaves a level");
    let child = split_two::<K, V, P>(mutid, existing_hash, existing_key, existing_value, hash, key, value, next);

    if let Node::Bitmap { slots, .. } = owned_mut(rc, mutid) {
        slots[idx] = Slot::Sub(P::new(child));
    }
    AssocOutcome::Inserted
}

/// Bitmap -> Array promotion: every set bit's slot becomes a full child
/// node at the next level (rehashing leaves that were stored inline,
/// since a Bitmap slot carries no hash of its own), then the new key is
/// placed into its own child.
fn promote_and_insert<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: K, value: V, shift: u32)
where
    K: HamtHash + Eq + Clone,
    V: Clone + PartialEq,
    P: PtrKind,
{
    let (old_bitmap, old_slots) = match &**rc {
        Node::Bitmap { bitmap, slots, .. } => (*bitmap, slots.clone()),
        _ => unreachable!(),
    };
    let next = next_shift(shift).expect("an Array node never occupies the last level");

    let mut children: Vec<Option<P::Rc<Node<K, V, P>>>> = (0..32).map(|_| None).collect();
    let mut slot_iter = old_slots.into_iter();
    for frag in 0u32..32 {
        if old_bitmap & (1 << frag) == 0 {
            continue;
        }
        let slot = slot_iter.next().expect("bitmap popcount matches the slot count");
        let child = match slot {
            Slot::Sub(sub) => sub,
            Slot::Leaf(k, v) => {
                let child_hash = k.hamt_hash();
                let mut empty = P::new(Node::empty(mutid));
                assoc(&mut empty, mutid, child_hash, k, v, next);
                empty
            }
        };
        children[frag as usize] = Some(child);
    }

    let new_frag = fragment(hash, shift) as usize;
    let mut new_child = P::new(Node::empty(mutid));
    assoc(&mut new_child, mutid, hash, key, value, next);
    children[new_frag] = Some(new_child);

    let count = old_bitmap.count_ones() as u16 + 1;
    *rc = P::new(Node::Array { children, count, mutid });
}

fn assoc_array<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: K, value: V, shift: u32) -> AssocOutcome<V>
where
    K: HamtHash + Eq + Clone,
    V: Clone + PartialEq,
    P: PtrKind,
{
    let frag = fragment(hash, shift) as usize;
    let next = next_shift(shift).expect("Array nodes never occupy the last level");
    let has_child = matches!(&**rc, Node::Array { children, .. } if children[frag].is_some());

    if has_child {
        let unchanged = match &**rc {
            Node::Array { children, .. } => {
                let child = children[frag].as_ref().expect("checked above");
                matches!(find_recursive(child, hash, &key, next), Some(v) if *v == value)
            }
            _ => unreachable!(),
        };
        if unchanged {
            return AssocOutcome::Unchanged(value);
        }
        let node = owned_mut(rc, mutid);
        let Node::Array { children, .. } = node else { unreachable!() };
        let child = children[frag].as_mut().expect("checked above");
        assoc(child, mutid, hash, key, value, next)
    } else {
        let mut child = P::new(Node::empty(mutid));
        assoc(&mut child, mutid, hash, key, value, next);
        let node = owned_mut(rc, mutid);
        if let Node::Array { children, count, .. } = node {
            children[frag] = Some(child);
            *count += 1;
        }
        AssocOutcome::Inserted
    }
}

fn assoc_collision<K, V, P>(rc: &mut P::Rc<Node<K, V, P>>, mutid: u64, hash: u32, key: K, value: V, shift: u32) -> AssocOutcome<V>
where
    K: HamtHash + Eq + Clone,
    V: Clone + PartialEq,
    P: PtrKind,
{
    let node_hash = match &**rc {
        Node::Collision { hash, .. } => *hash,
        _ => unreachable!(),
    };

    if node_hash != hash {
        // The new key's fragments matched this Collision's path down to
        // `shift` but its full hash differs: wrap the collision and the
        // new entry as siblings under a fresh one-entry Bitmap.
        let bit = bitpos(fragment(node_hash, shift));
        let mut wrapper: P::Rc<Node<K, V, P>> =
            P::new(Node::Bitmap { bitmap: bit, slots: vec![Slot::Sub(rc.clone())], mutid });
        let outcome = assoc_bitmap(&mut wrapper, mutid, hash, key, value, shift);
        *rc = wrapper;
        return outcome;
    }

    let existing_idx = match &**rc {
        Node::Collision { pairs, .. } => pairs.iter().position(|(k, _)| *k == key),
        _ => unreachable!(),
    };
    if let Some(i) = existing_idx {
        let equal = match &**rc {
            Node::Collision { pairs, .. } => pairs[i].1 == value,
            _ => unreachable!(),
        };
        if equal {
            return AssocOutcome::Unchanged(value);
        }
    }
    let Node::Collision { pairs, .. } = owned_mut(rc, mutid) else { unreachable!() };
    match existing_idx {
        Some(i) => {
            let old_value = std::mem::replace(&mut pairs[i].1, value);
            AssocOutcome::Replaced(old_value)
        }
        None => {
            pairs.push((key, value));
            AssocOutcome::Inserted
        }
    }
}
