use std::collections::BTreeMap;

use avl_bst::{AvlError, AvlMap};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
    Find(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => any::<u8>().prop_map(Op::Remove),
        1 => any::<u8>().prop_map(Op::Find),
    ]
}

proptest! {
    #[test]
    fn matches_btree_map(ops in proptest::collection::vec(op(), 1..300)) {
        let mut model = BTreeMap::new();
        let mut map = AvlMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    let expected = model.remove(&k).ok_or(AvlError::KeyNotFound);
                    prop_assert_eq!(map.remove(&k), expected);
                }
                Op::Find(k) => {
                    prop_assert_eq!(map.find(&k), model.get(&k));
                }
            }
            prop_assert!(map.assert_valid().is_ok(), "{:?}", map.assert_valid());
        }

        prop_assert_eq!(map.len(), model.len());
        let pairs: Vec<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, u16)> = model.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn height_bound_holds(keys in proptest::collection::btree_set(any::<i32>(), 1..500)) {
        let map: AvlMap<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        let n = map.len() as f64;
        prop_assert!((map.height() as f64) <= 1.44 * (n + 2.0).log2());
        prop_assert!(map.is_balanced());
    }
}
