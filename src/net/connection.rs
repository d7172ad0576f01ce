//! Per-connection I/O.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Read one request with a single bounded read
//! - Write one serialized response and close the write half

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::resilience::timeouts::with_timeout;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Bytes received from the client in one read.
#[derive(Debug)]
pub struct RawRequest {
    pub bytes: Vec<u8>,
    /// The read filled the buffer, so more data may have been dropped.
    pub possibly_truncated: bool,
}

/// Read a single chunk of at most `limit` bytes. No framing.
pub async fn read_request<S>(
    stream: &mut S,
    limit: usize,
    timeout: Option<Duration>,
) -> io::Result<RawRequest>
where
    S: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; limit];
    let n = with_timeout(timeout, stream.read(&mut buf)).await?;
    buf.truncate(n);
    Ok(RawRequest {
        possibly_truncated: n == limit,
        bytes: buf,
    })
}

/// Write the full response and shut down the write half.
pub async fn write_response<S>(stream: &mut S, bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(bytes).await?;
    stream.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
        assert!(id2.as_u64() > id1.as_u64());
        assert!(id1.to_string().starts_with("conn-"));
    }

    #[tokio::test]
    async fn read_is_bounded() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"GET /static/a HTTP/1.1\r\n\r\n").await.unwrap();

        let raw = read_request(&mut server, 8, None).await.unwrap();
        assert_eq!(raw.bytes, b"GET /sta");
        assert!(raw.possibly_truncated);
    }

    #[tokio::test]
    async fn short_read_is_not_truncated() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();

        let raw = read_request(&mut server, 1024, None).await.unwrap();
        assert_eq!(raw.bytes, b"GET / HTTP/1.1\r\n\r\n");
        assert!(!raw.possibly_truncated);
    }

    #[tokio::test]
    async fn silent_client_times_out() {
        let (_client, mut server) = tokio::io::duplex(64);
        let err = read_request(&mut server, 1024, Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn writes_and_closes() {
        let (mut client, mut server) = tokio::io::duplex(64);
        write_response(&mut server, b"HTTP/1.1 404 Not Found\r\n\r\n").await.unwrap();

        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }
}
