//! # Assay Core
//!
//! Flexible equality and containment engine behind the Assay assertion helpers.
//!
//! Test values are converted into an explicit value model and compared with
//! lenient, test-friendly rules:
//!
//! - [`Value`] - Closed set of value shapes (numbers, strings, sequences, maps, ...)
//! - [`Kind`] - Classification of a [`Value`]
//! - [`Reflect`] - Conversion from Rust values into [`Value`]s
//! - [`equal`] - Lenient equality (numeric widths, string/byte/rune interchange)
//! - [`contains`] - Substring, element, sub-sequence and sub-map containment
//! - [`is_zero`], [`is_empty`], [`length`] - Zero, emptiness and length queries
//!
//! ## Example
//!
//! ```
//! use assay_core::{contains, equal, Reflect};
//!
//! assert!(equal(&126_i8.reflect(), &126_i64.reflect()));
//! assert!(equal(&"abc".reflect(), &b"abc".to_vec().reflect()));
//! assert!(contains(&vec![1, 2, 4].reflect(), &vec![1, 2].reflect()));
//! assert!(!contains(&vec![1, 2, 9, 1, 2, 3].reflect(), &vec![1, 2, 3].reflect()));
//! ```

#![doc(html_root_url = "https://docs.rs/assay-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contains;
mod empty;
mod equal;
mod error;
mod number;
mod reflect;
mod value;

pub use contains::contains;
pub use empty::{is_empty, is_zero, length};
pub use equal::equal;
pub use error::{ValueError, ValueResult};
pub use number::{Number, NumberKind, Wide};
pub use reflect::Reflect;
pub use value::{Chan, Func, KeyType, Kind, Map, Opaque, Struct, StructBuilder, Value};
