//! # Assay REST
//!
//! In-memory HTTP testing on top of [`assay`] assertions. Requests are handed
//! straight to an async handler; no socket is opened.
//!
//! ## Key Features
//!
//! - **Request templates**: `{name}` path parameters and repeated query pairs
//! - **Response matchers**: status, headers and body checks reported through
//!   an [`assay::Assertion`]
//! - **Semantic JSON**: JSON bodies compare by content, ignoring key order
//!   and number formatting
//! - **Raw replay**: send a raw HTTP/1.1 request and compare the result with
//!   a raw response
//!
//! ## Example
//!
//! ```
//! use assay::Assertion;
//! use assay_rest::TestClient;
//! use http::StatusCode;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let a = Assertion::new();
//! let client = TestClient::fixed(
//!     StatusCode::OK,
//!     r#"{"id": 1, "roles": ["admin", "dev"]}"#,
//!     &[("content-type", "application/json")],
//! )
//! .unwrap();
//!
//! client
//!     .get("/users/{id}")
//!     .param("id", "1")
//!     .send()
//!     .await
//!     .assert_success(&a)
//!     .assert_header(&a, "content-type", "application/json")
//!     .assert_json_body(&a, &json!({"roles": ["admin", "dev"], "id": 1.0}));
//!
//! client
//!     .raw(
//!         &a,
//!         "GET /users/1 HTTP/1.1\r\nHost: example.com\r\n\r\n",
//!         "HTTP/1.1 200 OK\r\n\r\n{\"id\": 1, \"roles\": [\"admin\", \"dev\"]}",
//!     )
//!     .await;
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/assay-rest/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod raw;
mod request;
mod response;

pub use client::{Response, TestClient, TestClientRequest, TestHandler};
pub use error::RestError;
pub use raw::{parse_raw_request, parse_raw_response};
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
