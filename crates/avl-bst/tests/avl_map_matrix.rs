use avl_bst::{AvlError, AvlMap};

fn root_key<C: Fn(&i32, &i32) -> i32>(map: &AvlMap<i32, i32, C>) -> Option<i32> {
    map.root_index().map(|i| *map.key(i))
}

/// (key, bf, left key, right key) for every node, in key order.
fn shape<C: Fn(&i32, &i32) -> i32>(
    map: &AvlMap<i32, i32, C>,
) -> Vec<(i32, i32, Option<i32>, Option<i32>)> {
    let mut out = Vec::new();
    let mut curr = map.first();
    while let Some(i) = curr {
        let n = map.node(i);
        out.push((n.k, n.bf, n.l.map(|c| *map.key(c)), n.r.map(|c| *map.key(c))));
        curr = map.next(i);
    }
    out
}

#[test]
fn avl_map_smoke_matrix() {
    let mut map = AvlMap::<i32, i32>::new();
    map.insert(1, 1);
    map.insert(3, 5);
    map.insert(4, 5);
    map.insert(3, 15);
    map.insert(41, 0);
    map.insert(44, 123);

    assert_eq!(map.find(&44), Some(&123));
    assert_eq!(map.find(&3), Some(&15));
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 41, 44]);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_iteration_matrix() {
    let mut map = AvlMap::<String, i32>::new();
    assert_eq!(map.first(), None);
    assert_eq!(map.iter().next(), None);

    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);
    map.insert("c".to_string(), 3);

    let mut list = Vec::new();
    let mut entry = map.first();
    while let Some(i) = entry {
        list.push((map.key(i).clone(), *map.value(i)));
        entry = map.next(i);
    }
    let expected = vec![
        ("a".to_string(), 1),
        ("b".to_string(), 2),
        ("c".to_string(), 3),
    ];
    assert_eq!(list, expected);

    let from_iter: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(from_iter, expected);

    let reversed: Vec<&str> = map.keys().rev().map(String::as_str).collect();
    assert_eq!(reversed, vec!["c", "b", "a"]);

    let mut back = Vec::new();
    let mut entry = map.last();
    while let Some(i) = entry {
        back.push(*map.value(i));
        entry = map.prev(i);
    }
    assert_eq!(back, vec![3, 2, 1]);
}

#[test]
fn avl_map_ladder_insert_remove_matrix() {
    let mut map = AvlMap::<i32, i32>::new();

    for i in 0..300 {
        map.insert(i, i);
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 300);

    for i in (0..300).step_by(3) {
        assert_eq!(map.remove(&i), Ok(i));
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 200);

    for i in 0..300 {
        if i % 3 == 0 {
            assert_eq!(map.find(&i), None);
        } else {
            assert_eq!(map.find(&i), Some(&i));
        }
    }
}

#[test]
fn avl_map_descending_and_zigzag_matrix() {
    let mut map = AvlMap::<i32, ()>::new();
    for i in (0..128).rev() {
        map.insert(i, ());
        map.assert_valid().unwrap();
    }
    for i in 0..64 {
        let k = if i % 2 == 0 { 1000 + i } else { -1000 - i };
        map.insert(k, ());
        map.assert_valid().unwrap();
    }
    assert_eq!(map.len(), 192);
    while let Some(root) = map.root_index() {
        let k = *map.key(root);
        map.remove(&k).unwrap();
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
}

#[test]
fn avl_map_misc_api_matrix() {
    let mut map = AvlMap::<i32, i32>::with_capacity(8);
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), 0);
    assert_eq!(map.find_or_next_lower(&10), None);

    map.insert(10, 100);
    map.insert(5, 50);
    map.insert(20, 200);

    assert!(!map.is_empty());
    assert_eq!(map.find_index(&5).map(|i| *map.value(i)), Some(50));
    assert_eq!(map.first().map(|i| *map.key(i)), Some(5));
    assert_eq!(map.last().map(|i| *map.key(i)), Some(20));
    assert_eq!(map.find_or_next_lower(&4), None);
    assert_eq!(map.find_or_next_lower(&19).map(|i| *map.key(i)), Some(10));
    assert_eq!(map.find_or_next_lower(&21).map(|i| *map.key(i)), Some(20));

    *map.find_mut(&10).unwrap() = 101;
    let i20 = map.find_index(&20).unwrap();
    *map.value_mut_by_index(i20) = 201;
    assert_eq!(map.find(&10), Some(&101));
    assert_eq!(map.find(&20), Some(&201));

    assert!(map.contains_key(&10));
    assert_eq!(map.remove(&10), Ok(101));
    assert_eq!(map.remove(&10), Err(AvlError::KeyNotFound));
    assert!(map.is_balanced());

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.first(), None);
    assert_eq!(map.last(), None);
    map.assert_valid().unwrap();
}

#[test]
fn avl_map_debug_and_collect_matrix() {
    let mut map: AvlMap<i32, &str> = vec![(2, "b"), (1, "a")].into_iter().collect();
    map.extend([(3, "c"), (1, "z")]);
    assert_eq!(format!("{map:?}"), r#"{1: "z", 2: "b", 3: "c"}"#);
    let pairs: Vec<(i32, &str)> = (&map).into_iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![(1, "z"), (2, "b"), (3, "c")]);
}

#[test]
fn avl_map_custom_comparator_matrix() {
    let mut map = AvlMap::<i32, i32, _>::with_comparator(|a: &i32, b: &i32| b.cmp(a) as i32);
    for k in 0..20 {
        map.insert(k, k);
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, (0..20).rev().collect::<Vec<_>>());
    assert_eq!(map.remove(&7), Ok(7));
    map.assert_valid().unwrap();
}

#[test]
fn ascending_insert_rotates_after_third_key() {
    let mut map = AvlMap::<i32, i32>::new();
    map.insert(1, 1);
    map.insert(2, 2);
    assert_eq!(root_key(&map), Some(1));
    map.insert(3, 3);
    assert_eq!(root_key(&map), Some(2));
    assert_eq!(
        shape(&map),
        vec![(1, 0, None, None), (2, 0, Some(1), Some(3)), (3, 0, None, None)]
    );

    map.insert(4, 4);
    map.insert(5, 5);
    assert_eq!(root_key(&map), Some(2));
    assert!(map.height() <= 3);
    assert_eq!(
        shape(&map),
        vec![
            (1, 0, None, None),
            (2, -1, Some(1), Some(4)),
            (3, 0, None, None),
            (4, 0, Some(3), Some(5)),
            (5, 0, None, None),
        ]
    );
    map.assert_valid().unwrap();
}

#[test]
fn removing_root_of_three_promotes_predecessor() {
    let mut map = AvlMap::<i32, i32>::new();
    map.insert(2, 20);
    map.insert(1, 10);
    map.insert(3, 30);

    assert_eq!(map.remove(&2), Ok(20));
    assert_eq!(root_key(&map), Some(1));
    assert_eq!(shape(&map), vec![(1, -1, None, Some(3)), (3, 0, None, None)]);
    assert_eq!(map.height(), 2);
    map.assert_valid().unwrap();
}

#[test]
fn removing_missing_key_leaves_tree_untouched() {
    let mut map = AvlMap::<i32, i32>::new();
    for k in [8, 4, 12, 2, 6, 10, 14, 1] {
        map.insert(k, k);
    }
    let before = shape(&map);
    let root = map.root_index();

    assert_eq!(map.remove(&7), Err(AvlError::KeyNotFound));
    assert_eq!(shape(&map), before);
    assert_eq!(map.root_index(), root);
    assert_eq!(map.len(), 8);

    let mut empty = AvlMap::<i32, i32>::new();
    assert_eq!(empty.remove(&1), Err(AvlError::KeyNotFound));
}

#[test]
fn overwrite_keeps_shape() {
    let mut map = AvlMap::<i32, i32>::new();
    for k in 0..10 {
        map.insert(k, k);
    }
    let before = shape(&map);
    assert_eq!(map.insert(4, 400), Some(4));
    assert_eq!(map.insert(0, 0), Some(0));
    assert_eq!(map.insert(9, 900), Some(9));
    assert_eq!(shape(&map), before);
    assert_eq!(map.len(), 10);
    assert_eq!(map.find(&4), Some(&400));
    assert_eq!(map.find(&9), Some(&900));
}

#[test]
fn insert_then_remove_all_round_trip() {
    let keys: Vec<i32> = (0..200).map(|i| (i * 7919) % 211).collect();
    let mut map = AvlMap::new();
    for &k in &keys {
        map.insert(k, k.to_string());
    }
    map.assert_valid().unwrap();
    for &k in keys.iter().rev() {
        assert_eq!(map.remove(&k), Ok(k.to_string()));
        map.assert_valid().unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.root_index(), None);
}

#[test]
fn height_stays_within_avl_bound() {
    let mut map = AvlMap::<u32, ()>::new();
    for n in 1..=2000u32 {
        map.insert(n, ());
        let bound = 1.44 * ((n + 2) as f64).log2();
        assert!(
            (map.height() as f64) <= bound,
            "height {} above bound {bound} at n={n}",
            map.height()
        );
    }
}
