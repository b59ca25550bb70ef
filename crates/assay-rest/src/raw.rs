//! Parsing of raw HTTP/1.x messages for replay tests.
//!
//! Both parsers accept `\r\n` or `\n` line endings and ignore whitespace
//! before the start line, so messages can be written as indented string
//! literals. The body is everything after the first blank line, cut to
//! `Content-Length` when that header is present.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};

use crate::error::RestError;
use crate::request::{parse_header, TestRequest};
use crate::response::TestResponse;

struct Message<'a> {
    start_line: &'a str,
    headers: HeaderMap,
    body: &'a str,
}

fn split_message(raw: &str) -> Result<Message<'_>, RestError> {
    let raw = raw.trim_start();
    if raw.is_empty() {
        return Err(RestError::raw("empty message"));
    }

    let (head, body) = match (raw.find("\r\n\r\n"), raw.find("\n\n")) {
        (Some(crlf), Some(lf)) if lf < crlf => (&raw[..lf], &raw[lf + 2..]),
        (Some(crlf), _) => (&raw[..crlf], &raw[crlf + 4..]),
        (None, Some(lf)) => (&raw[..lf], &raw[lf + 2..]),
        (None, None) => (raw, ""),
    };

    let mut lines = head.lines();
    let start_line = lines.next().unwrap_or_default().trim_end();

    let mut headers = HeaderMap::new();
    for line in lines {
        let line = line.trim_end();
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| RestError::raw(format!("header line without colon: {line:?}")))?;
        let (name, value) = parse_header(name.trim(), value.trim())?;
        headers.append(name, value);
    }

    let body = match content_length(&headers)? {
        Some(len) if len < body.len() => body
            .get(..len)
            .ok_or_else(|| RestError::raw("content-length splits a character"))?,
        _ => body,
    };

    Ok(Message {
        start_line,
        headers,
        body,
    })
}

fn content_length(headers: &HeaderMap) -> Result<Option<usize>, RestError> {
    headers
        .get(http::header::CONTENT_LENGTH)
        .map(|v| {
            v.to_str()
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| RestError::raw("invalid content-length"))
        })
        .transpose()
}

fn check_version(version: &str) -> Result<(), RestError> {
    if version.starts_with("HTTP/1.") {
        Ok(())
    } else {
        Err(RestError::raw(format!("unsupported protocol version {version:?}")))
    }
}

/// Parses a raw request such as
///
/// ```text
/// POST /users?active=true HTTP/1.1
/// Host: example.com
/// Content-Type: application/json
///
/// {"name":"alice"}
/// ```
///
/// Absolute targets (`http://host/path`) keep only their path and query.
pub fn parse_raw_request(raw: &str) -> Result<TestRequest, RestError> {
    let message = split_message(raw)?;

    let mut parts = message.start_line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RestError::raw(format!("bad request line {:?}", message.start_line)));
    };
    check_version(version)?;

    let method = Method::from_bytes(method.as_bytes())
        .map_err(|e| RestError::raw(format!("bad method {method:?}: {e}")))?;
    let target: Uri = target
        .parse()
        .map_err(|e| RestError::raw(format!("bad request target {target:?}: {e}")))?;
    let uri = match target.path_and_query() {
        Some(pq) if target.scheme().is_some() => Uri::from(pq.clone()),
        _ => target,
    };

    Ok(TestRequest {
        method,
        uri,
        headers: message.headers,
        body: Bytes::copy_from_slice(message.body.as_bytes()),
    })
}

/// Parses a raw response such as
///
/// ```text
/// HTTP/1.1 201 Created
/// Content-Type: application/json
///
/// {"id":1}
/// ```
pub fn parse_raw_response(raw: &str) -> Result<TestResponse, RestError> {
    let message = split_message(raw)?;

    let mut parts = message.start_line.splitn(3, ' ');
    let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
        return Err(RestError::raw(format!("bad status line {:?}", message.start_line)));
    };
    check_version(version)?;

    let status = code
        .parse::<u16>()
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .ok_or_else(|| RestError::raw(format!("bad status code {code:?}")))?;

    Ok(TestResponse::new(
        status,
        message.headers,
        Bytes::copy_from_slice(message.body.as_bytes()),
    ))
}

/// Strips leading and trailing ASCII whitespace.
pub(crate) fn trim_space(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = parse_raw_request(
            "POST /users?active=true HTTP/1.1\r\n\
             Host: example.com\r\n\
             Content-Type: application/json\r\n\
             \r\n\
             {\"name\":\"alice\"}",
        )
        .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.uri, "/users?active=true");
        assert_eq!(request.header_str("host"), Some("example.com"));
        assert_eq!(&request.body[..], br#"{"name":"alice"}"#);
    }

    #[test]
    fn test_parse_request_lf_and_indent() {
        let raw = "
GET http://example.com/a/b?c=d HTTP/1.0
Accept: */*
";
        let request = parse_raw_request(raw).unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.uri, "/a/b?c=d");
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_parse_request_content_length() {
        let raw = "PUT /x HTTP/1.1\nContent-Length: 3\n\nabcdef";
        let request = parse_raw_request(raw).unwrap();
        assert_eq!(&request.body[..], b"abc");
    }

    #[test]
    fn test_parse_request_errors() {
        assert!(matches!(parse_raw_request(""), Err(RestError::RawParse(_))));
        assert!(matches!(parse_raw_request("GET /"), Err(RestError::RawParse(_))));
        assert!(matches!(
            parse_raw_request("GET / SPDY/3"),
            Err(RestError::RawParse(_))
        ));
        assert!(matches!(
            parse_raw_request("GET / HTTP/1.1\nno colon here\n\n"),
            Err(RestError::RawParse(_))
        ));
        assert!(matches!(
            parse_raw_request("GET / HTTP/1.1\nbad name: v\n\n"),
            Err(RestError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_parse_response() {
        let response = parse_raw_response(
            "HTTP/1.1 404 Not Found\n\
             Content-Type: text/plain\n\
             X-Trace: a\n\
             X-Trace: b\n\
             \n\
             missing\n",
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.header_str("content-type"), Some("text/plain"));
        assert_eq!(response.headers().get_all("x-trace").iter().count(), 2);
        assert_eq!(&response.body()[..], b"missing\n");
    }

    #[test]
    fn test_parse_response_without_reason() {
        let response = parse_raw_response("HTTP/1.1 204\n\n").unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(
            parse_raw_response("HTTP/1.1 abc OK\n\n"),
            Err(RestError::RawParse(_))
        ));
        assert!(matches!(
            parse_raw_response("HTTP/1.1 200 OK\nContent-Length: many\n\n"),
            Err(RestError::RawParse(_))
        ));
    }

    #[test]
    fn test_trim_space() {
        assert_eq!(trim_space(b"  a b \n"), b"a b");
        assert_eq!(trim_space(b" \t\n"), b"");
        assert_eq!(trim_space(b""), b"");
    }
}
