//! Error type for operations that can fail without panicking.
//!
//! Grounded on the pack's widespread `thiserror` usage rather than the
//! teacher's own style (the teacher has no error type of its own — its
//! arena only panics on invariant violations, which is too weak for the
//! fallible surface a transient handle and bulk-update path need here).

use thiserror::Error;

/// Errors returned by fallible operations on a map or transient handle.
#[derive(Debug, Error)]
pub enum HamtError {
    /// The requested key is not present in the map.
    #[error("key not found")]
    KeyNotFound,
    /// The transient handle was already consumed by [`crate::Transient::finish`]
    /// (or [`crate::TransientSync::finish`]) and cannot be used again.
    #[error("mutation has been finished")]
    AlreadyFinalized,
    /// A bulk-update source could not be converted into map entries.
    #[error("cannot convert source to map: {0}")]
    InvalidSource(String),
    /// An element of a bulk-update source was not a 2-element pair.
    #[error("element #{index} has length {len}; 2 is required")]
    InvalidPairLength {
        /// Position of the offending element in the source.
        index: usize,
        /// The element's actual length.
        len: usize,
    },
}
