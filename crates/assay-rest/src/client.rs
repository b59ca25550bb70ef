//! In-memory test client.

use std::future::Future;
use std::panic::Location;
use std::pin::Pin;
use std::sync::Arc;

use assay::{Assertion, Failure, Tester};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::Full;

use crate::error::RestError;
use crate::raw::{parse_raw_request, parse_raw_response, trim_space};
use crate::request::{parse_header, TestRequest, TestRequestBuilder};
use crate::response::TestResponse;

/// Response type produced by test handlers.
pub type Response = http::Response<Full<Bytes>>;

/// Handler function type for the test client.
pub type TestHandler =
    Arc<dyn Fn(TestRequest) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// A client that dispatches requests straight to a handler, without a
/// network connection.
///
/// ```
/// use assay::Assertion;
/// use assay_rest::TestClient;
/// use http::StatusCode;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let a = Assertion::new();
/// let client = TestClient::echo();
///
/// client
///     .get("/users/{id}")
///     .param("id", "7")
///     .query("verbose", "1")
///     .send()
///     .await
///     .assert_status(&a, StatusCode::OK)
///     .assert_json_contains(&a, &serde_json::json!({"path": "/users/7"}));
/// # }
/// ```
#[must_use]
#[derive(Clone)]
pub struct TestClient {
    handler: TestHandler,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a test client from an async handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(TestRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |req| Box::pin(handler(req))),
            default_headers: Vec::new(),
        }
    }

    /// Creates a client whose handler always answers with the same response.
    ///
    /// Headers are appended, so repeated names are all sent. An empty body
    /// is sent as no body.
    pub fn fixed(status: StatusCode, body: impl Into<String>, headers: &[(&str, &str)]) -> Result<Self, RestError> {
        let body = Bytes::from(body.into());
        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let (name, value) = parse_header(name, value)?;
            header_map.append(name, value);
        }

        Ok(Self::new(move |_req| {
            let mut response = http::Response::new(Full::new(body.clone()));
            *response.status_mut() = status;
            *response.headers_mut() = header_map.clone();
            async move { response }
        }))
    }

    /// Creates a client that describes each request back as JSON.
    ///
    /// The response object has `method`, `path`, `query` (key to list of
    /// values), `headers` and `body` fields.
    pub fn echo() -> Self {
        Self::new(|req| async move {
            let mut query = serde_json::Map::new();
            for (key, value) in req.query_pairs() {
                if let serde_json::Value::Array(values) = query
                    .entry(key)
                    .or_insert_with(|| serde_json::Value::Array(Vec::new()))
                {
                    values.push(value.into());
                }
            }

            let headers: serde_json::Map<String, serde_json::Value> = req
                .headers
                .iter()
                .map(|(name, value)| {
                    let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                    (name.as_str().to_string(), value.into())
                })
                .collect();

            let body = serde_json::json!({
                "method": req.method.as_str(),
                "path": req.path(),
                "query": query,
                "headers": headers,
                "body": String::from_utf8_lossy(&req.body),
            });

            let mut response = http::Response::new(Full::new(Bytes::from(body.to_string())));
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        })
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Creates a GET request.
    pub fn get(&self, path: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, path)
    }

    /// Creates a POST request.
    pub fn post(&self, path: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, path)
    }

    /// Creates a PUT request.
    pub fn put(&self, path: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, path)
    }

    /// Creates a PATCH request.
    pub fn patch(&self, path: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, path)
    }

    /// Creates a DELETE request.
    pub fn delete(&self, path: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, path)
    }

    /// Creates a request with any method.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, path))
    }

    /// Dispatches a prepared request.
    pub async fn dispatch(&self, request: TestRequest) -> Result<TestResponse, RestError> {
        tracing::debug!(method = %request.method, uri = %request.uri, "dispatching test request");
        let handler = Arc::clone(&self.handler);
        let response = TestResponse::from_http((handler)(request).await).await?;
        tracing::debug!(status = %response.status(), "test response received");
        Ok(response)
    }

    /// Replays a raw request and compares the result with a raw response.
    ///
    /// The status, every header named in `response` and the body with
    /// surrounding whitespace removed must match. Malformed input is reported
    /// as a failure.
    #[track_caller]
    pub fn raw<'a, T: Tester>(
        &'a self,
        a: &'a Assertion<T>,
        request: &'a str,
        response: &'a str,
    ) -> impl Future<Output = ()> + 'a {
        let at = Location::caller();
        async move {
            let (request, expected) = match parse_raw_request(request)
                .and_then(|req| Ok((req, parse_raw_response(response)?)))
            {
                Ok(pair) => pair,
                Err(e) => {
                    a.assert(false, Failure::at("raw", at).detail("err", e));
                    return;
                }
            };

            let actual = match self.dispatch(request).await {
                Ok(actual) => actual,
                Err(e) => {
                    a.assert(false, Failure::at("raw", at).detail("err", e));
                    return;
                }
            };

            compare(a, at, &expected, &actual);
        }
    }
}

fn compare<T: Tester>(
    a: &Assertion<T>,
    at: &'static Location<'static>,
    expected: &TestResponse,
    actual: &TestResponse,
) {
    a.assert(
        expected.status() == actual.status(),
        Failure::at("raw_status", at)
            .detail("expected", expected.status())
            .detail("actual", actual.status()),
    );

    for name in expected.headers().keys() {
        let want = expected.header_str(name).unwrap_or_default();
        let got = actual.header_str(name).unwrap_or_default();
        a.assert(
            want == got,
            Failure::at("raw_header", at)
                .detail("name", name)
                .detail("expected", want)
                .detail("actual", got),
        );
    }

    let want = trim_space(expected.body());
    let got = trim_space(actual.body());
    a.assert(
        want == got,
        Failure::at("raw_body", at)
            .detail("expected", String::from_utf8_lossy(want))
            .detail("actual", String::from_utf8_lossy(got)),
    );
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

/// A request builder bound to a test client.
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, mut builder: TestRequestBuilder) -> Self {
        for (name, value) in &client.default_headers {
            builder = builder.header(name, value);
        }
        Self { client, builder }
    }

    /// Fills a `{key}` placeholder in the path.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.param(key, value);
        self
    }

    /// Adds a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read; use
    /// [`try_send`](Self::try_send) to handle those errors.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("test request failed: {e}"),
        }
    }

    /// Sends the request and returns a `Result`.
    pub async fn try_send(self) -> Result<TestResponse, RestError> {
        let request = self.builder.build()?;
        self.client.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay::SoftTester;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo_client() {
        let client = TestClient::echo();
        let response = client
            .post("/items/{id}")
            .param("id", "9")
            .query("tag", "a")
            .query("tag", "b")
            .body("payload")
            .send()
            .await;

        let echoed = response.json_value().unwrap();
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["path"], "/items/9");
        assert_eq!(echoed["query"]["tag"], json!(["a", "b"]));
        assert_eq!(echoed["body"], "payload");
    }

    #[tokio::test]
    async fn test_fixed_response() {
        let client = TestClient::fixed(
            StatusCode::CREATED,
            "created",
            &[("x-id", "1"), ("x-id", "2")],
        )
        .unwrap();
        let response = client.post("/items").send().await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.text().unwrap(), "created");
        assert_eq!(response.headers().get_all("x-id").iter().count(), 2);
    }

    #[test]
    fn test_fixed_rejects_bad_header() {
        let result = TestClient::fixed(StatusCode::OK, "", &[("bad name", "v")]);
        assert!(matches!(result, Err(RestError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_custom_handler() {
        let client = TestClient::new(|req| async move {
            let body = if req.method == Method::GET {
                "GET response"
            } else {
                "Other response"
            };
            http::Response::new(Full::new(Bytes::from(body)))
        });

        assert_eq!(client.get("/").send().await.text().unwrap(), "GET response");
        assert_eq!(client.delete("/").send().await.text().unwrap(), "Other response");
    }

    #[tokio::test]
    async fn test_default_headers() {
        let client = TestClient::echo().with_default_header("X-Custom", "default-value");

        let response = client.get("/").send().await;
        assert_eq!(response.json_value().unwrap()["headers"]["x-custom"], "default-value");

        let response = client.get("/").header("x-custom", "override").send().await;
        assert_eq!(response.json_value().unwrap()["headers"]["x-custom"], "override");
    }

    #[tokio::test]
    async fn test_all_methods() {
        let client = TestClient::echo();
        for (method, response) in [
            ("GET", client.get("/").send().await),
            ("POST", client.post("/").send().await),
            ("PUT", client.put("/").send().await),
            ("PATCH", client.patch("/").send().await),
            ("DELETE", client.delete("/").send().await),
            ("OPTIONS", client.request(Method::OPTIONS, "/").send().await),
        ] {
            assert_eq!(response.json_value().unwrap()["method"], method);
        }
    }

    #[tokio::test]
    async fn test_try_send_reports_build_errors() {
        let client = TestClient::echo();
        let result = client.get("/").header("bad name", "v").try_send().await;
        assert!(matches!(result, Err(RestError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_raw_replay() {
        let a = Assertion::new();
        let client = TestClient::fixed(
            StatusCode::OK,
            "  hello\n",
            &[("content-type", "text/plain")],
        )
        .unwrap();

        client
            .raw(
                &a,
                "GET /greet HTTP/1.1\r\nHost: example.com\r\n\r\n",
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello",
            )
            .await;
    }

    #[tokio::test]
    async fn test_raw_replay_mismatch() {
        let a = Assertion::with_tester(SoftTester::new());
        let client = TestClient::fixed(StatusCode::NOT_FOUND, "nope", &[]).unwrap();

        client
            .raw(
                &a,
                "GET / HTTP/1.1\n\n",
                "HTTP/1.1 200 OK\nX-Version: 2\n\nyes",
            )
            .await;

        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 3);
        assert!(failures[0].starts_with("raw_status failed"));
        assert!(failures[0].contains(file!()));
        assert!(failures[1].contains("name: x-version"));
        assert!(failures[2].starts_with("raw_body failed"));
    }

    #[tokio::test]
    async fn test_raw_replay_malformed() {
        let a = Assertion::with_tester(SoftTester::new());
        TestClient::echo().raw(&a, "nonsense", "HTTP/1.1 200 OK\n\n").await;
        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("malformed raw message"));
    }
}
