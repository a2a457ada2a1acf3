//! Bulk update from external sources.
//!
//! [`crate::MapRepr::extend`] (via the standard [`Extend`] trait) already
//! covers the common case of updating from anything
//! `IntoIterator<Item = (K, V)>` — another map's own iterator, a `Vec`,
//! an array literal. The two functions here cover the cases spec.md's
//! "recognize the source kind at call time" design doesn't have a direct
//! Rust translation for, since this language picks the right conversion
//! at compile time instead: a source of pair-likes that might not
//! actually have two elements, and a source whose items need a fallible
//! conversion into `(K, V)` at all.

use crate::error::HamtError;
use crate::hashing::HamtHash;
use crate::map::MapRepr;
use crate::ptr::PtrKind;

/// Builds on `base` from a source whose items convert fallibly into
/// `(K, V)` pairs, surfacing the first conversion failure as
/// [`HamtError::InvalidSource`].
///
/// This is the Rust stand-in for spec.md's "sequence of sequences"
/// bulk-update kind: a `TryInto<(K, V)>` impl is the conversion spec.md
/// would otherwise recognize dynamically.
pub fn update_from_entries<K, V, P, I, E>(base: &MapRepr<K, V, P>, entries: I) -> Result<MapRepr<K, V, P>, HamtError>
where
    K: HamtHash + Eq + Clone,
    V: HamtHash + Clone + PartialEq,
    P: PtrKind,
    I: IntoIterator<Item = E>,
    E: TryInto<(K, V)>,
{
    let mut result = base.clone();
    for (index, item) in entries.into_iter().enumerate() {
        let (key, value) = item
            .try_into()
            .map_err(|_| HamtError::InvalidSource(format!("element #{index} could not be converted to a key-value pair")))?;
        result = result.set(key, value);
    }
    Ok(result)
}

/// Builds on `base` from a source of same-typed pair-likes (e.g. 2-element
/// slices or arrays), rejecting any element whose length isn't 2.
///
/// Grounded on spec.md's "sequence of sequences" case for the
/// homogeneous-element form: unlike [`update_from_entries`], this can
/// report exactly which element and length were wrong, matching
/// [`HamtError::InvalidPairLength`].
pub fn update_from_pairs<K, P, I, S>(base: &MapRepr<K, K, P>, entries: I) -> Result<MapRepr<K, K, P>, HamtError>
where
    K: HamtHash + Eq + Clone,
    P: PtrKind,
    I: IntoIterator<Item = S>,
    S: AsRef<[K]>,
{
    let mut result = base.clone();
    for (index, item) in entries.into_iter().enumerate() {
        let pair = item.as_ref();
        if pair.len() != 2 {
            return Err(HamtError::InvalidPairLength { index, len: pair.len() });
        }
        result = result.set(pair[0].clone(), pair[1].clone());
    }
    Ok(result)
}
