//! Response building and serialization.
//!
//! # Responsibilities
//! - Build a response from status code, reason phrase and body
//! - Provide the fixed error responses used across handlers
//! - Render status line, minimal headers and body into one buffer
//!
//! # Design Decisions
//! - No streaming: the full response is materialized before writing
//! - Every response carries `Connection: close`

/// Content type used by builder responses unless a handler overrides it.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// An HTTP response, owned by the call chain that built it until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    /// Build a response with the default HTML content type.
    pub fn new(status: u16, reason: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason,
            content_type: DEFAULT_CONTENT_TYPE,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn bad_request() -> Self {
        Self::new(400, "Bad Request", "<h1>400 Bad Request</h1>")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden", "<h1>403 Forbidden</h1>")
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found", "<h1>404 Not Found</h1>")
    }

    pub fn internal_error(detail: &str) -> Self {
        Self::new(
            500,
            "Internal Server Error",
            format!("<h1>500 Internal Server Error: {detail}</h1>"),
        )
    }

    pub fn bad_gateway(detail: &str) -> Self {
        Self::new(502, "Bad Gateway", format!("<h1>502 Bad Gateway: {detail}</h1>"))
    }

    /// Override the content type.
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = content_type;
        self
    }

    /// Render the response into bytes ready to write to a socket.
    pub fn serialize(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason,
            self.content_type,
            self.body.len()
        );

        let mut out = Vec::with_capacity(head.len() + self.body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(&self.body);
        out
    }
}
