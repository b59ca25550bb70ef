//! Test response wrapper and its matchers.

use std::fmt;

use assay::{Assertion, Failure, Reflect, Tester};
use assay_core::{contains, equal, Value};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RestError;

/// A response captured by the [`TestClient`](crate::TestClient).
///
/// The `assert_*` matchers report through the [`Assertion`] they are given
/// and return `&Self` so that they can be chained.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Creates a test response by collecting the body of an HTTP response.
    pub async fn from_http<B>(response: http::Response<B>) -> Result<Self, RestError>
    where
        B: http_body_util::BodyExt,
        B::Error: fmt::Display,
    {
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| RestError::BodyRead(e.to_string()))?
            .to_bytes();

        Ok(Self::new(parts.status, parts.headers, body))
    }

    /// Creates a test response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    pub fn text(&self) -> Result<String, RestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| RestError::BodyRead(format!("invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parses the body as an untyped JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, RestError> {
        self.json()
    }

    /// Checks the status code.
    #[track_caller]
    pub fn assert_status<T: Tester>(&self, a: &Assertion<T>, expected: StatusCode) -> &Self {
        a.assert(
            self.status == expected,
            Failure::new("status")
                .detail("expected", expected)
                .detail("actual", self.status),
        );
        self
    }

    /// Checks that the status code differs from `unexpected`.
    #[track_caller]
    pub fn assert_not_status<T: Tester>(&self, a: &Assertion<T>, unexpected: StatusCode) -> &Self {
        a.assert(
            self.status != unexpected,
            Failure::new("not_status").detail("actual", self.status),
        );
        self
    }

    /// Checks for a status in `100..=399`.
    #[track_caller]
    pub fn assert_success<T: Tester>(&self, a: &Assertion<T>) -> &Self {
        let code = self.status.as_u16();
        a.assert(
            (100..400).contains(&code),
            Failure::new("success").detail("actual", self.status),
        );
        self
    }

    /// Checks for a status of 400 or above.
    #[track_caller]
    pub fn assert_fail<T: Tester>(&self, a: &Assertion<T>) -> &Self {
        a.assert(
            self.status.as_u16() >= 400,
            Failure::new("fail").detail("actual", self.status),
        );
        self
    }

    /// Checks a header value. A missing header reads as the empty string.
    #[track_caller]
    pub fn assert_header<T: Tester>(
        &self,
        a: &Assertion<T>,
        name: impl AsRef<str>,
        expected: impl AsRef<str>,
    ) -> &Self {
        let name = name.as_ref();
        let actual = self.header_str(name).unwrap_or_default();
        a.assert(
            actual == expected.as_ref(),
            Failure::new("header")
                .detail("name", name)
                .detail("expected", expected.as_ref())
                .detail("actual", actual),
        );
        self
    }

    /// Checks that a header does not have the given value.
    #[track_caller]
    pub fn assert_not_header<T: Tester>(
        &self,
        a: &Assertion<T>,
        name: impl AsRef<str>,
        unexpected: impl AsRef<str>,
    ) -> &Self {
        let name = name.as_ref();
        let actual = self.header_str(name).unwrap_or_default();
        a.assert(
            actual != unexpected.as_ref(),
            Failure::new("not_header").detail("name", name).detail("actual", actual),
        );
        self
    }

    /// Checks the body bytes.
    #[track_caller]
    pub fn assert_body<T: Tester>(&self, a: &Assertion<T>, expected: impl AsRef<[u8]>) -> &Self {
        let expected = expected.as_ref();
        a.assert(
            self.body[..] == *expected,
            Failure::new("body")
                .detail("expected", String::from_utf8_lossy(expected))
                .detail("actual", String::from_utf8_lossy(&self.body)),
        );
        self
    }

    /// Checks the body as text.
    #[track_caller]
    pub fn assert_string_body<T: Tester>(&self, a: &Assertion<T>, expected: &str) -> &Self {
        let actual = String::from_utf8_lossy(&self.body);
        a.assert(
            actual == expected,
            Failure::new("string_body")
                .detail("expected", expected)
                .detail("actual", &actual),
        );
        self
    }

    /// Checks that the body contains `needle`.
    #[track_caller]
    pub fn assert_body_contains<T: Tester>(&self, a: &Assertion<T>, needle: impl Reflect) -> &Self {
        let needle = needle.reflect();
        let body = self.body[..].reflect();
        a.assert(
            contains(&body, &needle),
            Failure::new("body_contains")
                .detail("body", String::from_utf8_lossy(&self.body))
                .detail("item", &needle),
        );
        self
    }

    /// Checks that the body is empty.
    #[track_caller]
    pub fn assert_body_empty<T: Tester>(&self, a: &Assertion<T>) -> &Self {
        a.assert(
            self.body.is_empty(),
            Failure::new("body_empty").detail("actual", String::from_utf8_lossy(&self.body)),
        );
        self
    }

    /// Checks that the body is not empty.
    #[track_caller]
    pub fn assert_body_not_empty<T: Tester>(&self, a: &Assertion<T>) -> &Self {
        a.assert(!self.body.is_empty(), Failure::new("body_not_empty"));
        self
    }

    /// Checks that the body is JSON equal to `expected`.
    ///
    /// Object key order and numeric representation are ignored, so `1`,
    /// `1.0` and `1e0` all match.
    #[track_caller]
    pub fn assert_json_body<T, E>(&self, a: &Assertion<T>, expected: &E) -> &Self
    where
        T: Tester,
        E: Serialize + ?Sized,
    {
        match self.json_pair(expected) {
            Ok((actual, expected)) => a.assert(
                equal(&actual, &expected),
                Failure::new("json_body")
                    .detail("expected", &expected)
                    .detail("actual", &actual),
            ),
            Err(e) => a.assert(false, Failure::new("json_body").detail("err", e)),
        };
        self
    }

    /// Checks that the body JSON contains `expected`.
    ///
    /// Objects match when every expected key is present with an equal value;
    /// arrays match on a single element or a contiguous run of elements.
    #[track_caller]
    pub fn assert_json_contains<T, E>(&self, a: &Assertion<T>, expected: &E) -> &Self
    where
        T: Tester,
        E: Serialize + ?Sized,
    {
        match self.json_pair(expected) {
            Ok((actual, expected)) => a.assert(
                contains(&actual, &expected),
                Failure::new("json_contains")
                    .detail("container", &actual)
                    .detail("item", &expected),
            ),
            Err(e) => a.assert(false, Failure::new("json_contains").detail("err", e)),
        };
        self
    }

    fn json_pair<E: Serialize + ?Sized>(&self, expected: &E) -> Result<(Value, Value), RestError> {
        let expected = serde_json::to_value(expected)?;
        let actual = self.json_value()?;
        Ok((actual.reflect(), expected.reflect()))
    }
}
