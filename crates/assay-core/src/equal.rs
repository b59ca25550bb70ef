//! Lenient equality between values of possibly different shapes.

use crate::number::Number;
use crate::value::{Kind, Map, Value};

/// Reports whether two values are equal under the lenient test rules.
///
/// Rules are tried in order and the first that applies decides:
///
/// 1. strictly identical values are equal;
/// 2. `Nil` is only equal to `Nil`;
/// 3. functions or channels with the same address are equal;
/// 4. two pointers are equal when both are nil or their targets are equal;
///    structs, pointers, functions, channels and opaque values are never
///    coerced against anything else;
/// 5. strings, byte sequences and rune sequences compare by their UTF-8 text;
/// 6. sequences and arrays compare element by element;
/// 7. maps need the same key type and equal values for every key;
/// 8. numbers compare by value across widths;
/// 9. a `char` equals a one-character string holding it.
///
/// The relation is symmetric and never fails.
pub fn equal(v1: &Value, v2: &Value) -> bool {
    if v1 == v2 {
        return true;
    }
    if matches!(v1, Value::Nil) || matches!(v2, Value::Nil) {
        return false;
    }
    if same_identity(v1, v2) {
        return true;
    }

    let (k1, k2) = (v1.kind(), v2.kind());
    if k1 == Kind::Pointer && k2 == Kind::Pointer {
        return match (v1.deref(), v2.deref()) {
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, _) | (_, Value::Nil) => false,
            (t1, t2) => equal(t1, t2),
        };
    }
    if k1.is_reference_like() || k2.is_reference_like() {
        return false;
    }
    if k1.is_string_like() && k2.is_string_like() {
        return v1.text_bytes() == v2.text_bytes();
    }
    if k1.is_sequence_like() && k2.is_sequence_like() {
        return sequences_equal(v1, v2);
    }

    match (v1, v2) {
        (Value::Map(m1), Value::Map(m2)) => maps_equal(m1, m2),
        (Value::Number(n1), Value::Number(n2)) => n1.same_value(n2),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => char_equals_string(n, s),
        _ => false,
    }
}

fn same_identity(v1: &Value, v2: &Value) -> bool {
    match (v1, v2) {
        (Value::Func(f1), Value::Func(f2)) => {
            f1.addr().is_some() && f1.addr() == f2.addr() && f1.type_name() == f2.type_name()
        }
        (Value::Chan(c1), Value::Chan(c2)) => c1.addr().is_some() && c1.addr() == c2.addr(),
        _ => false,
    }
}

fn sequences_equal(v1: &Value, v2: &Value) -> bool {
    if v1.item_count() != v2.item_count() {
        return false;
    }
    match (v1.items(), v2.items()) {
        (Some(a), Some(b)) => a.iter().zip(b.iter()).all(|(x, y)| equal(x, y)),
        _ => false,
    }
}

fn maps_equal(m1: &Map, m2: &Map) -> bool {
    if m1.is_nil() != m2.is_nil() || m1.len() != m2.len() {
        return false;
    }
    if m1.same_storage(m2) {
        return true;
    }
    if m1.key_type() != m2.key_type() {
        return false;
    }
    m1.entries()
        .iter()
        .all(|(k, v)| m2.get(k).is_some_and(|other| equal(v, other)))
}

fn char_equals_string(n: &Number, s: &str) -> bool {
    let Some(c) = n.as_char() else {
        return false;
    };
    let mut chars = s.chars();
    chars.next() == Some(c) && chars.next().is_none()
}
