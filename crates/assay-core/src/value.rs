//! The value model compared by the equality and containment engines.

use std::borrow::Cow;
use std::fmt;

use crate::number::{Number, NumberKind};

/// Classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The absent value.
    Nil,
    /// Any integer, float or `char`.
    Numeric,
    /// A boolean.
    Bool,
    /// A native string.
    String,
    /// A byte sequence.
    Bytes,
    /// A code-point sequence.
    Runes,
    /// A variable-length sequence.
    Sequence,
    /// A fixed-length sequence.
    Array,
    /// An associative value.
    Map,
    /// A named record.
    Struct,
    /// A reference to another value.
    Pointer,
    /// A function value.
    Func,
    /// A channel-like value.
    Chan,
    /// Anything else.
    Other,
}

impl Kind {
    /// Returns the lowercase kind name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Numeric => "numeric",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Runes => "runes",
            Self::Sequence => "sequence",
            Self::Array => "array",
            Self::Map => "map",
            Self::Struct => "struct",
            Self::Pointer => "pointer",
            Self::Func => "func",
            Self::Chan => "chan",
            Self::Other => "other",
        }
    }

    /// String, bytes or runes.
    pub fn is_string_like(self) -> bool {
        matches!(self, Self::String | Self::Bytes | Self::Runes)
    }

    /// Sequence, array, bytes or runes.
    pub fn is_sequence_like(self) -> bool {
        matches!(self, Self::Sequence | Self::Array | Self::Bytes | Self::Runes)
    }

    /// Kinds that never take part in cross-kind coercion.
    pub fn is_reference_like(self) -> bool {
        matches!(self, Self::Struct | Self::Pointer | Self::Func | Self::Chan | Self::Other)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared key type of a [`Map`].
///
/// Maps with different key types are never equal, even when their keys
/// would compare equal one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Keys of mixed types (e.g. built by hand).
    Dynamic,
    /// `bool` keys.
    Bool,
    /// Numeric keys of one declared width.
    Number(NumberKind),
    /// String keys.
    String,
    /// Record keys.
    Struct,
    /// Reference keys.
    Pointer,
    /// Fixed-length array keys.
    Array,
    /// Any other key type.
    Other,
}

/// An associative value.
///
/// Entries keep insertion order for rendering; equality ignores order.
/// A map without entries storage is a nil map.
#[derive(Debug, Clone)]
pub struct Map {
    key_type: KeyType,
    entries: Option<Vec<(Value, Value)>>,
}

impl Map {
    /// Creates a map; later duplicates of a key replace earlier ones.
    pub fn new<I>(key_type: KeyType, entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut unique: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            if let Some(slot) = unique.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                unique.push((key, value));
            }
        }
        Self {
            key_type,
            entries: Some(unique),
        }
    }

    /// Creates a nil map.
    pub fn nil(key_type: KeyType) -> Self {
        Self {
            key_type,
            entries: None,
        }
    }

    /// Returns the declared key type.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Returns true for a nil map.
    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }

    /// Returns true when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(Value, Value)] {
        self.entries.as_deref().unwrap_or(&[])
    }

    /// Looks up a key by strict equality.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns true when both maps share the same entry storage.
    pub fn same_storage(&self, other: &Self) -> bool {
        match (&self.entries, &other.entries) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => std::ptr::eq(a.as_ptr(), b.as_ptr()),
            _ => false,
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key_type == other.key_type
            && self.is_nil() == other.is_nil()
            && self.len() == other.len()
            && self
                .entries()
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

/// A named record with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Struct {
    /// Creates a record from its fields.
    pub fn new(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Type name of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Builder for [`Struct`] values, see [`Value::structure`].
#[derive(Debug)]
pub struct StructBuilder {
    name: String,
    fields: Vec<(String, Value)>,
}

impl StructBuilder {
    /// Appends a field.
    pub fn field<T: crate::Reflect>(mut self, name: impl Into<String>, value: T) -> Self {
        self.fields.push((name.into(), value.reflect()));
        self
    }

    /// Finishes the record.
    pub fn build(self) -> Value {
        Value::Struct(Struct::new(self.name, self.fields))
    }
}

/// A function value, identified by its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    type_name: String,
    addr: Option<usize>,
}

impl Func {
    /// Type name of the function.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Address, or `None` for a nil function.
    pub fn addr(&self) -> Option<usize> {
        self.addr
    }
}

/// A channel-like value with a current length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chan {
    len: usize,
    addr: Option<usize>,
}

impl Chan {
    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address, or `None` for a nil channel.
    pub fn addr(&self) -> Option<usize> {
        self.addr
    }
}

/// A value outside the model, compared by type name and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    type_name: String,
    repr: String,
}

impl Opaque {
    /// Type name of the value.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Rendering of the value.
    pub fn repr(&self) -> &str {
        &self.repr
    }
}

/// A dynamically shaped value.
///
/// `PartialEq` is strict structural equality: same variant, same numeric
/// width, same map key type. Lenient comparison lives in [`crate::equal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A number of some declared width.
    Number(Number),
    /// A native string.
    String(String),
    /// A byte sequence; `None` is a nil sequence.
    Bytes(Option<Vec<u8>>),
    /// A code-point sequence; `None` is a nil sequence.
    Runes(Option<Vec<char>>),
    /// A variable-length sequence; `None` is a nil sequence.
    Seq(Option<Vec<Value>>),
    /// A fixed-length sequence.
    Array(Vec<Value>),
    /// An associative value.
    Map(Map),
    /// A named record.
    Struct(Struct),
    /// A reference; `None` is a nil pointer.
    Pointer(Option<Box<Value>>),
    /// A function value.
    Func(Func),
    /// A channel-like value.
    Chan(Chan),
    /// Anything else.
    Other(Opaque),
}

static NIL: Value = Value::Nil;

impl Value {
    /// Creates a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Creates a non-nil byte sequence.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Some(b.into()))
    }

    /// Creates a non-nil code-point sequence.
    pub fn runes(r: impl Into<Vec<char>>) -> Self {
        Self::Runes(Some(r.into()))
    }

    /// Creates a non-nil sequence.
    pub fn seq<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Seq(Some(items.into_iter().collect()))
    }

    /// Creates a nil sequence.
    pub fn nil_seq() -> Self {
        Self::Seq(None)
    }

    /// Creates a fixed-length array.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Creates a map with the given key type.
    pub fn map<I>(key_type: KeyType, entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Self::Map(Map::new(key_type, entries))
    }

    /// Creates a nil map.
    pub fn nil_map(key_type: KeyType) -> Self {
        Self::Map(Map::nil(key_type))
    }

    /// Starts a named record.
    pub fn structure(name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a function value; `None` is a nil function.
    pub fn func(type_name: impl Into<String>, addr: Option<usize>) -> Self {
        Self::Func(Func {
            type_name: type_name.into(),
            addr,
        })
    }

    /// Creates a function value identified by the address of `f`.
    pub fn func_ref<F: ?Sized>(f: &F) -> Self {
        let addr = (f as *const F).cast::<()>() as usize;
        Self::func(std::any::type_name::<F>(), Some(addr))
    }

    /// Creates a channel value; `None` is a nil channel.
    pub fn channel(len: usize, addr: Option<usize>) -> Self {
        Self::Chan(Chan { len, addr })
    }

    /// Creates an opaque value.
    pub fn opaque(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Self::Other(Opaque {
            type_name: type_name.into(),
            repr: repr.into(),
        })
    }

    /// Creates a non-nil pointer to `target`.
    pub fn pointer(target: Value) -> Self {
        Self::Pointer(Some(Box::new(target)))
    }

    /// Creates a nil pointer.
    pub fn nil_pointer() -> Self {
        Self::Pointer(None)
    }

    /// Classifies the value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Nil => Kind::Nil,
            Self::Bool(_) => Kind::Bool,
            Self::Number(_) => Kind::Numeric,
            Self::String(_) => Kind::String,
            Self::Bytes(_) => Kind::Bytes,
            Self::Runes(_) => Kind::Runes,
            Self::Seq(_) => Kind::Sequence,
            Self::Array(_) => Kind::Array,
            Self::Map(_) => Kind::Map,
            Self::Struct(_) => Kind::Struct,
            Self::Pointer(_) => Kind::Pointer,
            Self::Func(_) => Kind::Func,
            Self::Chan(_) => Kind::Chan,
            Self::Other(_) => Kind::Other,
        }
    }

    /// Follows pointers to their final target.
    ///
    /// A nil pointer dereferences to [`Value::Nil`].
    #[allow(clippy::should_implement_trait)]
    pub fn deref(&self) -> &Value {
        let mut current = self;
        loop {
            match current {
                Self::Pointer(Some(target)) => current = target,
                Self::Pointer(None) => return &NIL,
                other => return other,
            }
        }
    }

    /// Returns true for `Nil` and nil sequences, maps, pointers, functions
    /// and channels.
    pub fn is_nil(&self) -> bool {
        match self {
            Self::Nil | Self::Bytes(None) | Self::Runes(None) | Self::Seq(None) | Self::Pointer(None) => true,
            Self::Map(m) => m.is_nil(),
            Self::Func(f) => f.addr.is_none(),
            Self::Chan(c) => c.addr.is_none(),
            _ => false,
        }
    }

    /// Returns the numeric payload, if any.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as `f64` when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical UTF-8 bytes of a string-like value.
    pub(crate) fn text_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::String(s) => Some(Cow::Borrowed(s.as_bytes())),
            Self::Bytes(b) => Some(Cow::Borrowed(b.as_deref().unwrap_or(&[]))),
            Self::Runes(r) => Some(Cow::Owned(
                r.as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .collect::<String>()
                    .into_bytes(),
            )),
            _ => None,
        }
    }

    /// Elements of a sequence-like value; bytes and runes become numbers.
    pub(crate) fn items(&self) -> Option<Cow<'_, [Value]>> {
        match self {
            Self::Seq(items) => Some(Cow::Borrowed(items.as_deref().unwrap_or(&[]))),
            Self::Array(items) => Some(Cow::Borrowed(items)),
            Self::Bytes(b) => Some(Cow::Owned(
                b.as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .map(|&b| Value::Number(Number::U8(b)))
                    .collect(),
            )),
            Self::Runes(r) => Some(Cow::Owned(
                r.as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .map(|&c| Value::Number(Number::Char(c)))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Element count of a sequence-like value, without materializing it.
    pub(crate) fn item_count(&self) -> Option<usize> {
        match self {
            Self::Seq(items) => Some(items.as_ref().map_or(0, Vec::len)),
            Self::Array(items) => Some(items.len()),
            Self::Bytes(b) => Some(b.as_ref().map_or(0, Vec::len)),
            Self::Runes(r) => Some(r.as_ref().map_or(0, Vec::len)),
            _ => None,
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil | Self::Pointer(None) => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(_) | Self::Runes(_) | Self::Seq(_) | Self::Array(_) => {
                write_items(f, &self.items().unwrap_or_default())
            }
            Self::Map(m) => {
                f.write_str("map[")?;
                for (i, (k, v)) in m.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Self::Struct(s) => {
                write!(f, "{}{{", s.name)?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{name}:{value}")?;
                }
                f.write_str("}")
            }
            Self::Pointer(Some(target)) => write!(f, "&{target}"),
            Self::Func(func) => match func.addr {
                Some(addr) => write!(f, "{}@{addr:#x}", func.type_name),
                None => write!(f, "{}(<nil>)", func.type_name),
            },
            Self::Chan(c) => match c.addr {
                Some(addr) => write!(f, "chan(len={})@{addr:#x}", c.len),
                None => f.write_str("chan(<nil>)"),
            },
            Self::Other(o) => f.write_str(&o.repr),
        }
    }
}
