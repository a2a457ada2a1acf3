//! Behavioral checks around the Bitmap<->Array and Collision<->Bitmap
//! thresholds. These don't reach into the tree's internal shape (the
//! node types are not part of the public surface) — they drive each
//! threshold from the outside and check that lookups stay correct
//! immediately before, at, and after it.

use crate::hashing::HamtHash;
use crate::HamtMap;

/// A key whose engine hash is pinned directly to `forced_hash`, so a test
/// can pick exactly which fragment (and thus which bitmap bit, or
/// collision bucket) it lands in at shift 0.
///
/// Implements [`HamtHash`] itself rather than [`std::hash::Hash`]: going
/// through `Hash`/`DefaultHasher` would run `forced_hash` through SipHash
/// before folding, and SipHash has no obligation to preserve the
/// low-order bits a test pins it for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FixedHashKey {
    id: u32,
    forced_hash: u32,
}

impl HamtHash for FixedHashKey {
    fn hamt_hash(&self) -> u32 {
        self.forced_hash
    }
}

/// Inserting enough keys with pairwise-distinct top-level fragments
/// forces the root from a Bitmap node into an Array node; every key
/// remains reachable across the promotion.
#[test]
fn array_promotion_preserves_all_entries() {
    // 20 distinct low-5-bit fragments (0..20), each hashed through a
    // forced_hash chosen to land exactly on that fragment.
    let keys: Vec<FixedHashKey> = (0u32..20).map(|frag| FixedHashKey { id: frag, forced_hash: frag }).collect();

    let mut map = HamtMap::new();
    for (i, k) in keys.iter().enumerate() {
        map = map.set(k.clone(), i);
    }
    assert_eq!(map.len(), 20);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(map.get(k), Some(&i));
    }
}

/// Shrinking a promoted Array node back down (removing entries until
/// occupancy drops well below the promotion threshold) must demote
/// cleanly and keep every surviving key reachable.
#[test]
fn array_demotion_preserves_survivors() {
    let keys: Vec<FixedHashKey> = (0u32..20).map(|frag| FixedHashKey { id: frag, forced_hash: frag }).collect();

    let mut map = HamtMap::new();
    for (i, k) in keys.iter().enumerate() {
        map = map.set(k.clone(), i);
    }

    // Remove all but 3, dropping well below the demotion threshold.
    for k in &keys[3..] {
        map = map.delete(k).unwrap();
    }
    assert_eq!(map.len(), 3);
    for k in &keys[..3] {
        assert!(map.contains_key(k));
    }
    for k in &keys[3..] {
        assert!(!map.contains_key(k));
    }
}

/// A Collision node shrinking to a single pair demotes to an inline
/// Bitmap leaf; the surviving pair stays reachable, and removing it too
/// empties the map.
#[test]
fn collision_demotes_to_single_leaf_then_empties() {
    let k1 = FixedHashKey { id: 1, forced_hash: 0xF0F0 };
    let k2 = FixedHashKey { id: 2, forced_hash: 0xF0F0 };

    let map = HamtMap::new().set(k1.clone(), "a").set(k2.clone(), "b");
    assert_eq!(map.len(), 2);

    let map = map.delete(&k1).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&k2), Some(&"b"));
    assert_eq!(map.get(&k1), None);

    let map = map.delete(&k2).unwrap();
    assert!(map.is_empty());
}

/// A three-way collision demoted by one removal still resolves the
/// remaining two keys via the collision path.
#[test]
fn three_way_collision_demotes_by_one() {
    let keys: Vec<FixedHashKey> = (0u32..3).map(|id| FixedHashKey { id, forced_hash: 0x5555_5555 }).collect();

    let mut map = HamtMap::new();
    for (i, k) in keys.iter().enumerate() {
        map = map.set(k.clone(), i);
    }
    let map = map.delete(&keys[1]).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&keys[0]), Some(&0));
    assert_eq!(map.get(&keys[2]), Some(&2));
    assert_eq!(map.get(&keys[1]), None);
}
