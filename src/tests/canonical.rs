use crate::HamtMap;

/// Insertion order must not affect the resulting structural hash.
#[test]
fn insert_order_abc_cba_bca() {
    let orders: [&[(i32, i32)]; 3] =
        [&[(1, 10), (2, 20), (3, 30)], &[(3, 30), (2, 20), (1, 10)], &[(2, 20), (3, 30), (1, 10)]];

    let maps: Vec<HamtMap<i32, i32>> = orders
        .iter()
        .map(|pairs| {
            let mut m = HamtMap::new();
            for &(k, v) in *pairs {
                m = m.set(k, v);
            }
            m
        })
        .collect();

    assert_eq!(maps[0].hash_contents(), maps[1].hash_contents());
    assert_eq!(maps[1].hash_contents(), maps[2].hash_contents());
    assert_eq!(maps[0].len(), maps[1].len());
    assert_eq!(maps[0], maps[1]);
}

/// Larger set — 100 entries, three orderings.
#[test]
fn insert_order_100_entries() {
    let entries: Vec<(u64, u64)> = (0..100).map(|i| (i, i * 7)).collect();

    let mut forward = HamtMap::new();
    for &(k, v) in &entries {
        forward = forward.set(k, v);
    }

    let mut backward = HamtMap::new();
    for &(k, v) in entries.iter().rev() {
        backward = backward.set(k, v);
    }

    let mut interleaved = HamtMap::new();
    for &(k, v) in entries.iter().step_by(2) {
        interleaved = interleaved.set(k, v);
    }
    for &(k, v) in entries.iter().skip(1).step_by(2) {
        interleaved = interleaved.set(k, v);
    }

    assert_eq!(forward.hash_contents(), backward.hash_contents());
    assert_eq!(forward.hash_contents(), interleaved.hash_contents());
    assert_eq!(forward.len(), 100);
}

/// After overwrite, order independence still holds.
#[test]
fn overwrite_preserves_canonicity() {
    let map_a = HamtMap::new().set(1, 10).set(2, 20).set(1, 11);
    let map_b = HamtMap::new().set(2, 20).set(1, 11);

    assert_eq!(map_a.hash_contents(), map_b.hash_contents());
    assert_eq!(map_a.len(), map_b.len());
    assert_eq!(map_a, map_b);
}

/// After delete, order independence holds.
#[test]
fn delete_preserves_canonicity() {
    let map_a = HamtMap::new().set(1, 10).set(2, 20).set(3, 30);
    let map_a = map_a.delete(&2).unwrap();
    let map_b = HamtMap::new().set(3, 30).set(1, 10);

    assert_eq!(map_a.hash_contents(), map_b.hash_contents());
    assert_eq!(map_a.len(), map_b.len());
    assert_eq!(map_a, map_b);
}

/// Two maps with different contents are structurally unequal.
#[test]
fn different_contents_are_unequal() {
    let map_a = HamtMap::new().set(1, 10);
    let map_b = HamtMap::new().set(1, 11);
    assert_ne!(map_a, map_b);
}
