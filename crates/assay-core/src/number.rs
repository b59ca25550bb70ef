//! Numeric values of any declared width.

use std::fmt;

/// Declared numeric type of a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`, compared by code point.
    Char,
}

impl NumberKind {
    /// Returns the Rust type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number tagged with its declared width.
///
/// The derived `PartialEq` is strict: `I8(5)` and `I64(5)` differ. Use
/// [`Number::same_value`] (or [`crate::equal`]) to compare across widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    Isize(isize),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    Usize(usize),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `char`
    Char(char),
}

/// Width-independent form of a [`Number`].
///
/// Every integer (and `char`) fits in `i128` and every float in `f64`, so
/// widening never loses precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wide {
    /// Any integer or code point.
    Int(i128),
    /// Any float.
    Float(f64),
}

impl Wide {
    /// Compares two wide values by mathematical value.
    ///
    /// An integer and a float are equal only when the float is finite,
    /// integral and exactly equal to the integer.
    pub fn same_value(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => float_equals_int(f, i),
        }
    }

    /// Converts to `f64`, rounding large integers.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

fn float_equals_int(f: f64, i: i128) -> bool {
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }
    let bound = 2f64.powi(127);
    if f >= bound || f < -bound {
        return false;
    }
    #[allow(clippy::cast_possible_truncation)]
    let truncated = f as i128;
    truncated == i
}

impl Number {
    /// Returns the declared numeric type.
    pub fn kind(&self) -> NumberKind {
        match self {
            Self::I8(_) => NumberKind::I8,
            Self::I16(_) => NumberKind::I16,
            Self::I32(_) => NumberKind::I32,
            Self::I64(_) => NumberKind::I64,
            Self::Isize(_) => NumberKind::Isize,
            Self::U8(_) => NumberKind::U8,
            Self::U16(_) => NumberKind::U16,
            Self::U32(_) => NumberKind::U32,
            Self::U64(_) => NumberKind::U64,
            Self::Usize(_) => NumberKind::Usize,
            Self::F32(_) => NumberKind::F32,
            Self::F64(_) => NumberKind::F64,
            Self::Char(_) => NumberKind::Char,
        }
    }

    /// Normalizes to the width-independent form.
    #[allow(clippy::cast_lossless)]
    pub fn widen(&self) -> Wide {
        match *self {
            Self::I8(n) => Wide::Int(i128::from(n)),
            Self::I16(n) => Wide::Int(i128::from(n)),
            Self::I32(n) => Wide::Int(i128::from(n)),
            Self::I64(n) => Wide::Int(i128::from(n)),
            Self::Isize(n) => Wide::Int(n as i128),
            Self::U8(n) => Wide::Int(i128::from(n)),
            Self::U16(n) => Wide::Int(i128::from(n)),
            Self::U32(n) => Wide::Int(i128::from(n)),
            Self::U64(n) => Wide::Int(i128::from(n)),
            Self::Usize(n) => Wide::Int(n as i128),
            Self::F32(n) => Wide::Float(f64::from(n)),
            Self::F64(n) => Wide::Float(n),
            Self::Char(c) => Wide::Int(i128::from(u32::from(c))),
        }
    }

    /// Compares by mathematical value regardless of width.
    pub fn same_value(&self, other: &Self) -> bool {
        self.widen().same_value(other.widen())
    }

    /// Returns true for the zero value of the declared type.
    ///
    /// Floats are zero only for the positive zero bit pattern.
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::F32(f) => f.to_bits() == 0,
            Self::F64(f) => f.to_bits() == 0,
            Self::Char(c) => c == '\0',
            _ => matches!(self.widen(), Wide::Int(0)),
        }
    }

    /// Returns the value as `f64`.
    pub fn as_f64(&self) -> f64 {
        self.widen().to_f64()
    }

    /// Returns the code point when this is a `char`.
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the byte when this is a `u8`.
    pub fn as_u8(&self) -> Option<u8> {
        match *self {
            Self::U8(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(n) => write!(f, "{n}"),
            Self::I16(n) => write!(f, "{n}"),
            Self::I32(n) => write!(f, "{n}"),
            Self::I64(n) => write!(f, "{n}"),
            Self::Isize(n) => write!(f, "{n}"),
            Self::U8(n) => write!(f, "{n}"),
            Self::U16(n) => write!(f, "{n}"),
            Self::U32(n) => write!(f, "{n}"),
            Self::U64(n) => write!(f, "{n}"),
            Self::Usize(n) => write!(f, "{n}"),
            Self::F32(n) => write!(f, "{n}"),
            Self::F64(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Self::$variant(n)
                }
            }
        )*
    };
}

number_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
}
