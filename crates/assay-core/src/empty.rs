//! Zero, emptiness and length queries.

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

/// Reports whether a value is nil or the zero value of its type.
///
/// Pointers are followed, so a pointer to `0` is zero as well.
pub fn is_zero(v: &Value) -> bool {
    zero_value(v) || zero_value(v.deref())
}

fn zero_value(v: &Value) -> bool {
    match v {
        Value::Nil => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.is_zero(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(zero_value),
        Value::Struct(s) => s.fields().iter().all(|(_, f)| zero_value(f)),
        Value::Other(o) => o.repr().is_empty(),
        other => other.is_nil(),
    }
}

/// Reports whether a value is zero or a collection of length zero.
pub fn is_empty(v: &Value) -> bool {
    if is_zero(v) {
        return true;
    }
    match v.deref() {
        Value::Chan(c) => c.is_empty(),
        Value::Map(m) => m.is_empty(),
        other => other.item_count() == Some(0),
    }
}

/// Returns the length of a string, sequence, array, map or channel.
///
/// `Nil` has length zero. Strings are measured in bytes.
pub fn length(v: &Value) -> ValueResult<usize> {
    if matches!(v, Value::Nil) {
        return Ok(0);
    }
    match v.deref() {
        Value::String(s) => Ok(s.len()),
        Value::Map(m) => Ok(m.len()),
        Value::Chan(c) => Ok(c.len()),
        other => other
            .item_count()
            .ok_or_else(|| ValueError::unsupported_length(other.kind())),
    }
}
