//! Harness error types.

use thiserror::Error;

/// Errors raised while building, sending or parsing test traffic.
#[derive(Error, Debug)]
pub enum RestError {
    /// The request could not be assembled.
    #[error("request build error: {0}")]
    RequestBuild(String),

    /// The response body could not be read.
    #[error("body read error: {0}")]
    BodyRead(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A raw HTTP message could not be parsed.
    #[error("malformed raw message: {0}")]
    RawParse(String),
}

impl RestError {
    pub(crate) fn raw(reason: impl Into<String>) -> Self {
        Self::RawParse(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RestError::InvalidHeader("bad name".into()).to_string(),
            "invalid header: bad name"
        );
        assert_eq!(RestError::raw("empty").to_string(), "malformed raw message: empty");
    }

    #[test]
    fn test_json_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RestError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
