//! End-to-end behavior of the comparison engines through the public API.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use assay_core::{contains, equal, is_empty, is_zero, length, KeyType, Kind, Reflect, Value, ValueError};

fn eq<A: Reflect + ?Sized, B: Reflect + ?Sized>(a: &A, b: &B) -> bool {
    let (a, b) = (a.reflect(), b.reflect());
    let result = equal(&a, &b);
    assert_eq!(result, equal(&b, &a), "equal must be symmetric for {a} and {b}");
    result
}

fn has<C: Reflect + ?Sized, I: Reflect + ?Sized>(container: &C, item: &I) -> bool {
    contains(&container.reflect(), &item.reflect())
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn numeric_width_transparency() {
    assert!(eq(&126_i8, &126_i64));
    assert!(eq(&7_usize, &7_i64));
    assert!(eq(&5_i8, &5_i64));
    assert!(eq(&5_i64, &5.0_f32));
    assert!(eq(&u64::MAX, &u64::MAX));
    assert!(!eq(&u64::MAX, &(u64::MAX as f64)));
}

#[test]
fn string_byte_rune_interchange() {
    assert!(eq("abc", &b"abc".to_vec()));
    assert!(eq(&"中文abc".chars().collect::<Vec<char>>(), "中文abc"));
    assert!(eq(&String::from("中文"), &"中文".as_bytes().to_vec()));
}

#[test]
fn sequence_and_array_cross_type() {
    assert!(eq(&vec![1_i64, 2, 3], &vec![1_i8, 2, 3]));
    assert!(eq(&vec![1_i64, 2, 3], &[1_i8, 2, 3]));
    assert!(!eq(&vec![1_i64, 2, 3], &vec![1_i64, 2]));
    assert!(!eq(&vec![1_i64, 2, 3], &vec![3_i64, 2, 1]));
}

#[test]
fn nested_collections() {
    let a = vec![HashMap::from([("k", vec![1_i32, 2])])];
    let b = vec![HashMap::from([("k", [1_u64, 2])])];
    assert!(eq(&a, &b));
}

#[test]
fn map_key_type_strictness() {
    let a: HashMap<i64, i64> = HashMap::from([(1, 1)]);
    let b: HashMap<i8, i64> = HashMap::from([(1, 1)]);
    assert!(!eq(&a, &b));

    let c: BTreeMap<i64, i8> = BTreeMap::from([(1, 1)]);
    assert!(eq(&a, &c));
}

#[test]
fn no_string_number_conversion() {
    assert!(!eq("5", &5_i32));
    assert!(!eq(&true, &1_i32));
    assert!(eq(&'a', "a"));
}

#[test]
fn json_values_compare_with_native_values() {
    let json = serde_json::json!({"name": "assay", "tags": ["a", "b"], "n": 3});
    let mut native = HashMap::new();
    native.insert("name", Value::string("assay"));
    native.insert("tags", vec!["a", "b"].reflect());
    native.insert("n", 3_u8.reflect());
    assert!(eq(&json, &native));
}

#[test]
fn dynamic_key_maps_do_not_equal_typed_maps() {
    let dynamic = Value::map(KeyType::Dynamic, [(Value::string("a"), Value::Bool(true))]);
    let typed = HashMap::from([("a", true)]).reflect();
    assert!(!equal(&dynamic, &typed));
}

// =============================================================================
// Containment
// =============================================================================

#[test]
fn containment_reflexive_for_non_empty_values() {
    assert!(has("x", "x"));
    assert!(has(&vec![1, 2, 3], &vec![1, 2, 3]));
    assert!(has(&HashMap::from([("a", 1)]), &HashMap::from([("a", 1)])));
    assert!(has(&42_u16, &42_u16));
}

#[test]
fn empty_container_never_contains() {
    assert!(!has(&Vec::<i32>::new(), &Vec::<i32>::new()));
    assert!(!has("", ""));
    assert!(!contains(&Value::Nil, &Value::Nil));
}

#[test]
fn substring_containment() {
    assert!(has("abc", "bc"));
    assert!(has("abc", &b'a'));
    assert!(!has("abc", "abcd"));
}

#[test]
fn subsequence_containment() {
    assert!(has(&vec![1, 2, 4], &vec![1, 2]));
}

#[test]
fn subsequence_containment_does_not_backtrack() {
    assert!(!has(&vec![1, 2, 9, 1, 2, 3], &vec![1, 2, 3]));
}

#[test]
fn map_containment() {
    let container: HashMap<String, i64> = HashMap::from([("1".into(), 1), ("2".into(), 2)]);
    let item: HashMap<String, i8> = HashMap::from([("1".into(), 1)]);
    let wrong: HashMap<String, i64> = HashMap::from([("1".into(), 110)]);
    assert!(has(&container, &item));
    assert!(!has(&container, &wrong));
}

// =============================================================================
// Zero, empty, length
// =============================================================================

#[test]
fn zero_and_empty() {
    assert!(is_zero(&0_i32.reflect()));
    assert!(is_empty(&Vec::<String>::new().reflect()));
    assert!(!is_empty(&vec![String::new()].reflect()));
    assert!(is_empty(&Duration::ZERO.reflect()));
    assert!(is_empty(&Some(Duration::ZERO).reflect()));
    assert!(is_empty(&().reflect()));
}

#[test]
fn length_of_unsized_kinds_fails() {
    assert_eq!(
        length(&5_i32.reflect()),
        Err(ValueError::UnsupportedLength { kind: Kind::Numeric })
    );
    assert_eq!(length(&"abc".reflect()), Ok(3));
}
