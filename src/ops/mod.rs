//! Recursive tree algorithms: lookup, insertion, and removal.
//!
//! Each submodule mirrors one of the three `map_node_*` families in the
//! C extension this crate's data model follows (bitmap / array /
//! collision dispatch), generalized over [`crate::ptr::PtrKind`] so the
//! same code drives both the `Rc`- and `Arc`-backed map flavors.

pub mod assoc;
pub mod find;
pub mod without;

use crate::node::Node;
use crate::ptr::PtrKind;

/// Returns `&mut Node` for `rc`, editing in place when `mutid` already
/// owns this node (and no one else holds a reference to it), otherwise
/// cloning it first and stamping the clone with `mutid`.
///
/// This is the Rust realization of the `mutid != 0 && self->b_mutid ==
/// mutid` check scattered through the original `map_node_*_assoc` /
/// `*_without` functions, with [`PtrKind::get_mut`] standing in for the
/// refcount check C gets from `Py_REFCNT`.
pub(crate) fn owned_mut<'a, K, V, P>(rc: &'a mut P::Rc<Node<K, V, P>>, mutid: u64) -> &'a mut Node<K, V, P>
where
    K: Clone,
    V: Clone,
    P: PtrKind,
{
    if mutid != 0 && rc.mutid() == mutid {
        if let Some(node) = P::get_mut(rc) {
            return node;
        }
    }
    let cloned = clone_with_mutid(rc, mutid);
    *rc = P::new(cloned);
    P::get_mut(rc).expect("a freshly allocated Rc has exactly one owner")
}

fn clone_with_mutid<K: Clone, V: Clone, P: PtrKind>(node: &Node<K, V, P>, mutid: u64) -> Node<K, V, P> {
    match node {
        Node::Bitmap { bitmap, slots, .. } => Node::Bitmap { bitmap: *bitmap, slots: slots.clone(), mutid },
        Node::Array { children, count, .. } => Node::Array { children: children.clone(), count: *count, mutid },
        Node::Collision { hash, pairs, .. } => Node::Collision { hash: *hash, pairs: pairs.clone(), mutid },
    }
}
