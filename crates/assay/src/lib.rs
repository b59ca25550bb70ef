//! Fluent assertions for Rust tests.
//!
//! `assay` compares values leniently: integers of different widths, strings
//! against byte and `char` slices, and maps with different key
//! representations compare by content. The comparison engines live in
//! [`assay_core`] and are re-exported here.
//!
//! # Overview
//!
//! - [`Assertion`] - chained checks that report to a [`Tester`]
//! - [`PanicTester`] / [`SoftTester`] - stop at the first failure, or collect
//!   them all
//! - [`AssertConfig`] / [`ConfigLoader`] - layered configuration
//!   (defaults → file → env)
//! - [`init_test_logging`] - route assertion events to the test output
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use assay::{Assertion, SoftTester};
//!
//! let a = Assertion::with_tester(SoftTester::new());
//! let ages = HashMap::from([("alice", 31_u8), ("bob", 27)]);
//!
//! a.equal(&ages, HashMap::from([("bob".to_string(), 27_i64), ("alice".to_string(), 31)]))
//!     .contains(&ages, HashMap::from([("bob", 27)]))
//!     .between(ages["alice"], 30.0, 40.0)
//!     .equal("5", 5);
//!
//! assert_eq!(a.tester().take_failures().len(), 1);
//! ```
//!
//! # Configuration
//!
//! ```toml
//! fatal = false
//! max_value_len = 1024
//!
//! [logging]
//! enabled = true
//! level = "assay=warn"
//! ```
//!
//! Every value can be overridden with `ASSAY__FATAL`, `ASSAY__MAX_VALUE_LEN`,
//! `ASSAY__LOGGING__ENABLED` or `ASSAY__LOGGING__LEVEL` when the loader uses
//! the `ASSAY` prefix.

#![doc(html_root_url = "https://docs.rs/assay/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assertion;
mod config;
mod error;
mod failure;
mod loader;
pub mod logging;
mod tester;

pub use assay_core;
pub use assay_core::{contains, equal, is_empty, is_zero, length, KeyType, Kind, Reflect, Value, ValueError};
pub use assertion::Assertion;
pub use config::{AssertConfig, LogSettings};
pub use error::ConfigError;
pub use failure::{default_format, truncate, Failure, FailureFormatter};
pub use loader::ConfigLoader;
pub use logging::{create_env_filter, init_test_logging};
pub use tester::{PanicTester, SoftTester, Tester};

/// Creates an [`Assertion`] that panics on the first failure.
pub fn assert() -> Assertion {
    Assertion::new()
}
