//! Conversion of Rust values into [`Value`]s.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::number::{Number, NumberKind};
use crate::value::{KeyType, Value};

/// Types that can be inspected by the comparison engines.
///
/// Byte slices become [`Value::Bytes`] and `char` slices [`Value::Runes`],
/// so that they take part in string comparisons.
pub trait Reflect {
    /// Converts `self` into a [`Value`].
    fn reflect(&self) -> Value;

    /// Converts a slice of `Self`; overridden by `u8` and `char`.
    #[doc(hidden)]
    fn reflect_slice(items: &[Self]) -> Value
    where
        Self: Sized,
    {
        Value::Seq(Some(items.iter().map(Reflect::reflect).collect()))
    }

    /// Key type recorded for maps keyed by `Self`.
    fn key_type() -> KeyType {
        KeyType::Other
    }
}

macro_rules! reflect_number {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value {
                    Value::Number(Number::from(*self))
                }

                fn key_type() -> KeyType {
                    KeyType::Number(NumberKind::$kind)
                }
            }
        )*
    };
}

reflect_number! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Reflect for u8 {
    fn reflect(&self) -> Value {
        Value::Number(Number::U8(*self))
    }

    fn reflect_slice(items: &[Self]) -> Value {
        Value::Bytes(Some(items.to_vec()))
    }

    fn key_type() -> KeyType {
        KeyType::Number(NumberKind::U8)
    }
}

impl Reflect for char {
    fn reflect(&self) -> Value {
        Value::Number(Number::Char(*self))
    }

    fn reflect_slice(items: &[Self]) -> Value {
        Value::Runes(Some(items.to_vec()))
    }

    fn key_type() -> KeyType {
        KeyType::Number(NumberKind::Char)
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }

    fn key_type() -> KeyType {
        KeyType::Bool
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::String(self.to_owned())
    }

    fn key_type() -> KeyType {
        KeyType::String
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::String(self.clone())
    }

    fn key_type() -> KeyType {
        KeyType::String
    }
}

impl Reflect for Cow<'_, str> {
    fn reflect(&self) -> Value {
        Value::String(self.to_string())
    }

    fn key_type() -> KeyType {
        KeyType::String
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }

    fn key_type() -> KeyType {
        T::key_type()
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value {
        T::reflect_slice(self)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        T::reflect_slice(self)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Value {
        Value::Seq(Some(self.iter().map(Reflect::reflect).collect()))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        Value::Array(self.iter().map(Reflect::reflect).collect())
    }

    fn key_type() -> KeyType {
        KeyType::Array
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value {
        Value::map(
            K::key_type(),
            self.iter().map(|(k, v)| (k.reflect(), v.reflect())),
        )
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value {
        Value::map(
            K::key_type(),
            self.iter().map(|(k, v)| (k.reflect(), v.reflect())),
        )
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        Value::pointer((**self).reflect())
    }

    fn key_type() -> KeyType {
        KeyType::Pointer
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn reflect(&self) -> Value {
        Value::pointer((**self).reflect())
    }

    fn key_type() -> KeyType {
        KeyType::Pointer
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Value {
        Value::pointer((**self).reflect())
    }

    fn key_type() -> KeyType {
        KeyType::Pointer
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        match self {
            Some(v) => Value::pointer(v.reflect()),
            None => Value::nil_pointer(),
        }
    }

    fn key_type() -> KeyType {
        KeyType::Pointer
    }
}

impl Reflect for () {
    fn reflect(&self) -> Value {
        Value::structure("()").build()
    }

    fn key_type() -> KeyType {
        KeyType::Struct
    }
}

impl Reflect for Duration {
    fn reflect(&self) -> Value {
        Value::structure("Duration")
            .field("secs", self.as_secs())
            .field("nanos", self.subsec_nanos())
            .build()
    }

    fn key_type() -> KeyType {
        KeyType::Struct
    }
}

impl Reflect for serde_json::Value {
    fn reflect(&self) -> Value {
        match self {
            Self::Null => Value::Nil,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Seq(Some(items.iter().map(Reflect::reflect).collect())),
            Self::Object(fields) => Value::map(
                KeyType::String,
                fields
                    .iter()
                    .map(|(k, v)| (Value::String(k.clone()), v.reflect())),
            ),
        }
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }

    fn key_type() -> KeyType {
        KeyType::Dynamic
    }
}
