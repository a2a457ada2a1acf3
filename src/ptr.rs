//! Pointer-kind abstraction shared by [`crate::HamtMap`] and [`crate::HamtMapSync`].
//!
//! The node algebra in [`crate::node`] and [`crate::ops`] is written once,
//! generic over which smart pointer backs subtree sharing. [`RcK`] picks
//! `Rc` (single-threaded, cheaper clones); [`ArcK`] picks `Arc` (`Send +
//! Sync`). This mirrors the idea behind `archery`'s `SharedPointerKind`
//! (seen in the `rpds` hash trie map) without pulling in the crate itself —
//! only the generic-over-pointer-kind shape is needed here.

use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// Chooses the smart pointer used for subtree sharing.
pub trait PtrKind: Clone + 'static {
    /// The shared pointer type, e.g. `Rc<T>` or `Arc<T>`.
    type Rc<T>: Clone + Deref<Target = T>;

    /// Allocates a new shared value.
    fn new<T>(value: T) -> Self::Rc<T>;

    /// Returns a mutable reference iff `rc` is the sole owner.
    fn get_mut<T>(rc: &mut Self::Rc<T>) -> Option<&mut T>;

    /// Returns `true` if both pointers refer to the same allocation.
    fn ptr_eq<T>(a: &Self::Rc<T>, b: &Self::Rc<T>) -> bool;
}

/// Single-threaded pointer kind, backed by [`std::rc::Rc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RcK;

impl PtrKind for RcK {
    type Rc<T> = Rc<T>;

    fn new<T>(value: T) -> Rc<T> {
        Rc::new(value)
    }

    fn get_mut<T>(rc: &mut Rc<T>) -> Option<&mut T> {
        Rc::get_mut(rc)
    }

    fn ptr_eq<T>(a: &Rc<T>, b: &Rc<T>) -> bool {
        Rc::ptr_eq(a, b)
    }
}

/// Thread-safe pointer kind, backed by [`std::sync::Arc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcK;

impl PtrKind for ArcK {
    type Rc<T> = Arc<T>;

    fn new<T>(value: T) -> Arc<T> {
        Arc::new(value)
    }

    fn get_mut<T>(rc: &mut Arc<T>) -> Option<&mut T> {
        Arc::get_mut(rc)
    }

    fn ptr_eq<T>(a: &Arc<T>, b: &Arc<T>) -> bool {
        Arc::ptr_eq(a, b)
    }
}
