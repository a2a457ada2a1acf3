use std::hash::{Hash, Hasher};

use crate::HamtMap;

/// A key type with a controllable hash value for testing hash collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollidingKey {
    id: u32,
    forced_hash: u64,
}

impl CollidingKey {
    const fn new(id: u32, hash: u64) -> Self {
        Self { id, forced_hash: hash }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forced_hash.hash(state);
    }
}

/// Two keys with the same hash create a collision node.
#[test]
fn two_colliding_keys() {
    let k1 = CollidingKey::new(1, 0xDEAD_BEEF);
    let k2 = CollidingKey::new(2, 0xDEAD_BEEF);

    let map = HamtMap::new().set(k1.clone(), "first").set(k2.clone(), "second");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"first"));
    assert_eq!(map.get(&k2), Some(&"second"));
}

/// Three keys with the same hash.
#[test]
fn three_colliding_keys() {
    let keys: Vec<CollidingKey> = (0..3).map(|i| CollidingKey::new(i, 0xCAFE)).collect();

    let mut map = HamtMap::new();
    for (i, k) in keys.iter().enumerate() {
        map = map.set(k.clone(), i);
    }

    assert_eq!(map.len(), 3);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(map.get(k), Some(&i));
    }
}

/// Remove from collision node.
#[test]
fn remove_from_collision() {
    let k1 = CollidingKey::new(1, 0xAAAA);
    let k2 = CollidingKey::new(2, 0xAAAA);
    let k3 = CollidingKey::new(3, 0xAAAA);

    let map = HamtMap::new().set(k1.clone(), 10).set(k2.clone(), 20).set(k3.clone(), 30);
    let map = map.delete(&k2).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&10));
    assert_eq!(map.get(&k2), None);
    assert_eq!(map.get(&k3), Some(&30));
}

/// Overwrite in collision node.
#[test]
fn overwrite_in_collision() {
    let k1 = CollidingKey::new(1, 0xBBBB);
    let k2 = CollidingKey::new(2, 0xBBBB);

    let map = HamtMap::new().set(k1.clone(), "old").set(k2.clone(), "val2").set(k1.clone(), "new");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"new"));
}

/// Collision node with remove-all returns to empty.
#[test]
fn collision_remove_all() {
    let k1 = CollidingKey::new(1, 0xCCCC);
    let k2 = CollidingKey::new(2, 0xCCCC);

    let map = HamtMap::new().set(k1.clone(), 1).set(k2.clone(), 2);
    let map = map.delete(&k1).unwrap().delete(&k2).unwrap();
    assert!(map.is_empty());
}

/// Mixed: some keys collide, some don't.
#[test]
fn mixed_collisions_and_normal() {
    let collide_a = CollidingKey::new(1, 0xDDDD);
    let collide_b = CollidingKey::new(2, 0xDDDD);
    let normal = CollidingKey::new(3, 0xEEEE);

    let map = HamtMap::new().set(collide_a.clone(), "a").set(collide_b.clone(), "b").set(normal.clone(), "c");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&collide_a), Some(&"a"));
    assert_eq!(map.get(&collide_b), Some(&"b"));
    assert_eq!(map.get(&normal), Some(&"c"));
}

/// A collision node reached below the root (intermediate fragments match
/// first) still wraps and splits correctly when a non-colliding key's
/// fragment happens to diverge only deep in the trie.
#[test]
fn collision_then_diverging_insert() {
    let k1 = CollidingKey::new(1, 0x1111_1111);
    let k2 = CollidingKey::new(2, 0x1111_1111);
    let other = CollidingKey::new(3, 0x2222_2222);

    let map = HamtMap::new().set(k1.clone(), "x").set(k2.clone(), "y").set(other.clone(), "z");
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&k1), Some(&"x"));
    assert_eq!(map.get(&k2), Some(&"y"));
    assert_eq!(map.get(&other), Some(&"z"));

    let map = map.delete(&other).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"x"));
    assert_eq!(map.get(&k2), Some(&"y"));
}
