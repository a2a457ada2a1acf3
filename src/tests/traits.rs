use crate::HamtMap;

#[test]
fn default_is_empty() {
    let map: HamtMap<i32, i32> = HamtMap::default();
    assert!(map.is_empty());
}

#[test]
fn debug_format() {
    let map: HamtMap<i32, i32> = HamtMap::new();
    let dbg = format!("{map:?}");
    assert!(dbg.contains("HamtMap"));
    assert!(dbg.contains("len"));
}

#[test]
fn from_iterator() {
    let map: HamtMap<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&1), Some(&10));
}

#[test]
fn extend_trait() {
    let mut map = HamtMap::new().set(1, 10);
    map.extend(vec![(2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);
}

#[test]
fn index_existing() {
    let map = HamtMap::new().set("key", 42);
    assert_eq!(map[&"key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: HamtMap<i32, i32> = HamtMap::new();
    let _ = map[&999];
}

#[test]
fn clone_shares_structure_but_is_independent() {
    let original = HamtMap::new().set(1, 1);
    let cloned = original.clone();
    let updated = cloned.set(2, 2);

    assert_eq!(original.len(), 1);
    assert_eq!(updated.len(), 2);
}

#[test]
fn into_iterator_yields_all_pairs() {
    let map = HamtMap::new().set(1, "a").set(2, "b").set(3, "c");
    let mut seen: Vec<(i32, &str)> = (&map).into_iter().map(|(k, v)| (*k, *v)).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![(1, "a"), (2, "b"), (3, "c")]);
}
