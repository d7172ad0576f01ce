//! TCP listener implementation.
//!
//! # Responsibilities
//! - Bind an IPv4 socket on the configured host and port
//! - Listen with the configured backlog
//! - Accept one connection at a time
//! - Report bind and listen failures as distinct errors

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to create or bind the socket.
    #[error("Failed to bind: {0}")]
    Bind(#[source] io::Error),
    /// Failed to put the socket into listening state.
    #[error("Failed to listen: {0}")]
    Listen(#[source] io::Error),
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(#[source] io::Error),
}

impl ListenerError {
    /// Process exit code for this failure.
    ///
    /// Only `Bind` and `Listen` can come back from `HttpServer::launch`; the
    /// accept loop logs `Accept` errors and keeps going.
    pub fn exit_code(&self) -> u8 {
        match self {
            ListenerError::Bind(_) => 2,
            ListenerError::Listen(_) => 3,
            ListenerError::Accept(_) => 1,
        }
    }
}

/// The bound, listening server socket.
pub struct Listener {
    inner: TcpListener,
    backlog: u32,
}

impl Listener {
    /// Bind and listen according to `config`.
    pub fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let ip: Ipv4Addr = config
            .bind_host
            .parse()
            .map_err(|e| ListenerError::Bind(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
        let addr = SocketAddr::from((ip, config.port));

        let socket = TcpSocket::new_v4().map_err(ListenerError::Bind)?;
        socket.set_reuseaddr(true).map_err(ListenerError::Bind)?;
        socket.bind(addr).map_err(ListenerError::Bind)?;
        let inner = socket.listen(config.backlog).map_err(ListenerError::Listen)?;

        let local_addr = inner.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Listener bound"
        );

        Ok(Self {
            inner,
            backlog: config.backlog,
        })
    }

    /// Wait for the next connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        tracing::debug!(peer_addr = %addr, "Connection accepted");
        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, io::Error> {
        self.inner.local_addr()
    }

    /// Get the configured listen backlog.
    pub fn backlog(&self) -> u32 {
        self.backlog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback(port: u16) -> ListenerConfig {
        ListenerConfig {
            bind_host: "127.0.0.1".into(),
            port,
            backlog: 10,
        }
    }

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let listener = Listener::bind(&loopback(0)).unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.is_ipv4());
        assert_ne!(addr.port(), 0);
        assert_eq!(listener.backlog(), 10);
    }

    #[tokio::test]
    async fn port_in_use_is_bind_error() {
        let first = Listener::bind(&loopback(0)).unwrap();
        let port = first.local_addr().unwrap().port();

        let err = Listener::bind(&loopback(port)).err().unwrap();
        assert!(matches!(err, ListenerError::Bind(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn non_ipv4_host_is_bind_error() {
        let mut config = loopback(0);
        config.bind_host = "localhost".into();
        assert!(matches!(Listener::bind(&config), Err(ListenerError::Bind(_))));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let bind = ListenerError::Bind(io::Error::from(io::ErrorKind::AddrInUse));
        let listen = ListenerError::Listen(io::Error::from(io::ErrorKind::Other));
        assert_ne!(bind.exit_code(), listen.exit_code());
        assert_eq!(listen.exit_code(), 3);
    }
}
