#![cfg(feature = "serde")]

use avl_bst::AvlMap;

#[test]
fn serializes_in_key_order() {
    let map: AvlMap<String, u32> = [("b", 2), ("c", 3), ("a", 1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);
}

#[test]
fn deserializes_into_valid_tree() {
    let map: AvlMap<String, i32> =
        serde_json::from_str(r#"{"z":26,"m":13,"a":1,"q":17,"m":-13}"#).unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map.find(&"m".to_string()), Some(&-13));
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "m", "q", "z"]);
    map.assert_valid().unwrap();
}
