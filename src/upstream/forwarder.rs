//! Reverse proxy forwarding.
//!
//! # Responsibilities
//! - Rebuild a minimal HTTP/1.1 request for the backend
//! - Perform exactly one send and one receive per request
//! - Extract the body of the backend reply and wrap it in a 200
//!
//! # Design Decisions
//! - No header forwarding; only `Host`, `Content-Length`, `Connection: close`
//! - The backend status line is discarded, the client always sees 200 on success
//! - A single read: replies longer than the buffer are truncated

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::http::response::Response;
use crate::resilience::timeouts::with_timeout;
use crate::upstream::connector::{connect_to_backend, ConnectError};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Errors raised while forwarding to the backend. Each maps to a 502.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("backend unavailable: {0}")]
    Unavailable(#[from] ConnectError),

    #[error("failed to send to backend: {0}")]
    Send(#[source] io::Error),

    #[error("failed to read from backend: {0}")]
    Read(#[source] io::Error),

    #[error("backend closed the connection without replying")]
    EmptyReply,
}

impl ForwardError {
    /// The 502 response the client receives for this failure.
    pub fn to_response(&self) -> Response {
        match self {
            ForwardError::Unavailable(_) => Response::bad_gateway("Backend Unavailable"),
            ForwardError::Send(_) => Response::bad_gateway("Failed to Send to Backend"),
            ForwardError::Read(_) | ForwardError::EmptyReply => {
                Response::bad_gateway("Failed to Read from Backend")
            }
        }
    }
}

/// Forwards `/api` requests to the single configured backend.
#[derive(Debug, Clone)]
pub struct Forwarder {
    host: String,
    port: u16,
    host_header: String,
    buffer_bytes: usize,
    connect_timeout: Option<Duration>,
    io_timeout: Option<Duration>,
}

impl Forwarder {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            host: config.backend.host.clone(),
            port: config.backend.port,
            host_header: config.backend.host_header.clone(),
            buffer_bytes: config.limits.backend_buffer_bytes,
            connect_timeout: config.timeouts.backend_connect(),
            io_timeout: config.timeouts.backend_io(),
        }
    }

    /// Send one request to the backend and relay the body of its reply.
    pub async fn forward(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
    ) -> Result<Response, ForwardError> {
        let request = build_backend_request(method, path, &self.host_header, body);

        let mut stream = connect_to_backend(&self.host, self.port, self.connect_timeout).await?;

        with_timeout(self.io_timeout, stream.write_all(&request))
            .await
            .map_err(ForwardError::Send)?;

        let mut reply = vec![0u8; self.buffer_bytes];
        let n = with_timeout(self.io_timeout, stream.read(&mut reply))
            .await
            .map_err(ForwardError::Read)?;
        drop(stream);

        if n == 0 {
            return Err(ForwardError::EmptyReply);
        }
        if n == reply.len() {
            tracing::warn!(
                limit = self.buffer_bytes,
                "Backend reply filled the read buffer and may be truncated"
            );
        }

        tracing::debug!(
            backend = %format!("{}:{}", self.host, self.port),
            reply_bytes = n,
            "Backend replied"
        );

        Ok(Response::ok(extract_body(&reply[..n])))
    }
}

/// Build the request line, the three fixed headers and the body.
pub fn build_backend_request(method: &str, path: &str, host: &str, body: &[u8]) -> Vec<u8> {
    let head = format!(
        "{method} {path} HTTP/1.1\r\nHost: {host}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let mut out = Vec::with_capacity(head.len() + body.len());
    out.extend_from_slice(head.as_bytes());
    out.extend_from_slice(body);
    out
}

/// Everything after the first blank line, or the whole reply if there is none.
pub fn extract_body(reply: &[u8]) -> &[u8] {
    reply
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
        .map(|pos| &reply[pos + HEADER_TERMINATOR.len()..])
        .unwrap_or(reply)
}
