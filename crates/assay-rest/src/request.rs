//! Test request building.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::Serialize;

use crate::error::RestError;

/// A request handed to the handler of a [`TestClient`](crate::TestClient).
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method
    pub method: Method,
    /// Request URI, path and query only
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
}

impl TestRequest {
    /// Creates a GET request builder.
    pub fn get(path: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, path)
    }

    /// Creates a POST request builder.
    pub fn post(path: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, path)
    }

    /// Creates a PUT request builder.
    pub fn put(path: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, path)
    }

    /// Creates a PATCH request builder.
    pub fn patch(path: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, path)
    }

    /// Creates a DELETE request builder.
    pub fn delete(path: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, path)
    }

    /// The request path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Decoded query pairs in the order they appear.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.uri
            .query()
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default()
    }

    /// Gets a header value as a string.
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }
}

/// Builder for test requests.
///
/// The path may contain `{name}` placeholders filled in by
/// [`param`](Self::param), so that one template serves several requests:
///
/// ```
/// use assay_rest::TestRequest;
///
/// let request = TestRequest::get("/users/{id}/posts")
///     .param("id", "42")
///     .query("page", "2")
///     .query("tag", "a b")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.uri, "/users/42/posts?page=2&tag=a%20b");
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestRequestBuilder {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    queries: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    json_error: Option<String>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: Method, path: impl AsRef<str>) -> Self {
        Self {
            method,
            path: path.as_ref().to_string(),
            params: Vec::new(),
            queries: Vec::new(),
            headers: Vec::new(),
            body: None,
            json_error: None,
        }
    }

    /// Replaces every `{key}` placeholder in the path with `value`.
    ///
    /// Setting the same key again replaces the earlier value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Adds a query pair. Repeated keys keep every value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.push((key.into(), value.into()));
        self
    }

    /// Sets a header, replacing an earlier value with the same name.
    ///
    /// Invalid names or values are reported by [`build`](Self::build).
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.as_ref().to_string()));
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body as JSON and the matching Content-Type.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.json_error = Some(e.to_string()),
        }
        self.content_type("application/json")
    }

    /// The path with parameters substituted and the encoded query appended.
    pub fn target(&self) -> String {
        let mut path = self.path.clone();
        for (key, value) in &self.params {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        if !self.queries.is_empty() {
            path.push(if path.contains('?') { '&' } else { '?' });
            path.push_str(&encode_query(&self.queries));
        }
        path
    }

    /// Builds the test request.
    pub fn build(self) -> Result<TestRequest, RestError> {
        if let Some(reason) = self.json_error {
            return Err(RestError::RequestBuild(format!("cannot encode JSON body: {reason}")));
        }

        let target = self.target();
        let uri: Uri = target
            .parse()
            .map_err(|e| RestError::RequestBuild(format!("invalid URI {target:?}: {e}")))?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        Ok(TestRequest {
            method: self.method,
            uri,
            headers,
            body: self.body.unwrap_or_default(),
        })
    }
}

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), RestError> {
    let header_name = HeaderName::try_from(name)
        .map_err(|e| RestError::InvalidHeader(format!("{name:?}: {e}")))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|e| RestError::InvalidHeader(format!("{name}: {value:?}: {e}")))?;
    Ok((header_name, header_value))
}

/// Encodes query pairs sorted by key; values of one key keep their order.
fn encode_query(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
