//! Value error types.

use thiserror::Error;

use crate::value::Kind;

/// Result type for fallible value queries.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors produced by value queries.
///
/// Equality and containment are total and never fail; only size queries
/// on kinds without a length do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value's kind has no length.
    #[error("cannot get length of {kind}")]
    UnsupportedLength {
        /// Kind of the offending value.
        kind: Kind,
    },
}

impl ValueError {
    /// Creates an unsupported length error.
    pub fn unsupported_length(kind: Kind) -> Self {
        Self::UnsupportedLength { kind }
    }

    /// Returns the kind that caused the error.
    pub fn kind(&self) -> Kind {
        match self {
            Self::UnsupportedLength { kind } => *kind,
        }
    }
}
