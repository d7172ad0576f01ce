//! Request parsing.
//!
//! Turns the raw bytes read from a connection into a [`Request`]. Only the
//! method, the request target and the body are kept; headers are consulted for
//! `Content-Length` and then dropped.

use thiserror::Error;

const MAX_HEADERS: usize = 64;

/// A parsed inbound request. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Request target as sent, always starting with `/`.
    pub path: String,
    pub body: Vec<u8>,
}

impl Request {
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Errors produced while parsing a request.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request: {0}")]
    Malformed(#[from] httparse::Error),

    #[error("request head is incomplete")]
    Incomplete,

    #[error("request line is missing")]
    MissingRequestLine,

    #[error("request target `{0}` does not start with '/'")]
    InvalidPath(String),
}

/// Parse a request from a single read buffer.
///
/// The body is whatever follows the header block, clipped to `Content-Length`
/// when that header is present and parseable.
pub fn parse_request(bytes: &[u8]) -> Result<Request, ParseError> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut req = httparse::Request::new(&mut headers);

    let header_len = match req.parse(bytes)? {
        httparse::Status::Complete(len) => len,
        httparse::Status::Partial => return Err(ParseError::Incomplete),
    };

    let method = req.method.ok_or(ParseError::MissingRequestLine)?.to_string();
    let path = req.path.ok_or(ParseError::MissingRequestLine)?.to_string();
    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath(path));
    }

    let content_length = req
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-length"))
        .and_then(|h| std::str::from_utf8(h.value).ok())
        .and_then(|v| v.trim().parse::<usize>().ok());

    let rest = &bytes[header_len..];
    let body = match content_length {
        Some(len) => &rest[..len.min(rest.len())],
        None => rest,
    };

    Ok(Request {
        method,
        path,
        body: body.to_vec(),
    })
}
