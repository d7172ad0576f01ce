//! Outbound connections to the backend.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;

use crate::resilience::timeouts::with_timeout;

/// Errors raised while opening a backend connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no IPv4 address found for {0}")]
    NoIpv4Address(String),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("connect to {0} timed out")]
    Timeout(SocketAddr),
}

/// Resolve `host:port` to its first IPv4 address and open a stream to it.
///
/// The connection is short-lived: the caller uses it for one exchange and
/// drops it.
pub async fn connect_to_backend(
    host: &str,
    port: u16,
    connect_timeout: Option<Duration>,
) -> Result<TcpStream, ConnectError> {
    let addr = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| ConnectError::Resolve {
            host: host.to_string(),
            source,
        })?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| ConnectError::NoIpv4Address(host.to_string()))?;

    tracing::debug!(backend = %addr, "Connecting to backend");

    with_timeout(connect_timeout, TcpStream::connect(addr))
        .await
        .map_err(|source| connect_failure(addr, source))
}

fn connect_failure(addr: SocketAddr, source: io::Error) -> ConnectError {
    match source.kind() {
        io::ErrorKind::TimedOut => ConnectError::Timeout(addr),
        _ => ConnectError::Connect { addr, source },
    }
}
