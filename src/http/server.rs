//! HTTP server setup and the connection loop.
//!
//! # Responsibilities
//! - Bind the listener (`launch`) or take a pre-bound one (`serve`)
//! - Accept one connection at a time
//! - Read, parse, route, serialize, write, close
//! - Stop accepting when the shutdown signal fires
//!
//! # Design Decisions
//! - Strictly sequential: a connection's full lifecycle completes before the
//!   next accept, nothing is spawned per connection
//! - Per-request failures become responses and never end the loop
//! - Shutdown is only observed between connections

use std::net::SocketAddr;

use tokio::net::TcpStream;
use tokio::sync::broadcast;

use crate::config::ServerConfig;
use crate::http::request::parse_request;
use crate::http::response::Response;
use crate::net::connection::{read_request, write_response, ConnectionId};
use crate::net::{Listener, ListenerError};
use crate::routing::Router;

/// The edge server: one listener, one router, one connection at a time.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = Router::from_config(&config);
        Self { router, config }
    }

    /// Bind the configured port and run until shutdown.
    ///
    /// Bind and listen failures are returned before the loop starts.
    pub async fn launch(self, shutdown: broadcast::Receiver<()>) -> Result<(), ListenerError> {
        let listener = Listener::bind(&self.config.listener)?;
        self.serve(listener, shutdown).await
    }

    /// Run the accept loop on an already bound listener.
    pub async fn serve(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(
            port = addr.port(),
            address = %addr,
            static_root = %self.config.static_files.root.display(),
            backend = %format!("{}:{}", self.config.backend.host, self.config.backend.port),
            "===== Waiting for connections on port {} =====",
            addr.port()
        );

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => self.handle_connection(stream, peer).await,
                    Err(e) => tracing::error!(error = %e, "Accept failed"),
                },
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) {
        let id = ConnectionId::new();
        let limits = &self.config.limits;

        let raw = match read_request(
            &mut stream,
            limits.request_buffer_bytes,
            self.config.timeouts.client_read(),
        )
        .await
        {
            Ok(raw) if raw.bytes.is_empty() => {
                tracing::debug!(connection_id = %id, peer_addr = %peer, "Client closed without sending");
                return;
            }
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(connection_id = %id, peer_addr = %peer, error = %e, "Failed to read request");
                return;
            }
        };

        if raw.possibly_truncated {
            tracing::warn!(
                connection_id = %id,
                limit = limits.request_buffer_bytes,
                "Request filled the read buffer and may be truncated"
            );
        }
        tracing::debug!(connection_id = %id, raw = %String::from_utf8_lossy(&raw.bytes), "Raw request");

        let response = match parse_request(&raw.bytes) {
            Ok(request) => {
                tracing::info!(
                    connection_id = %id,
                    peer_addr = %peer,
                    method = %request.method,
                    path = %request.path,
                    body_len = request.body_len(),
                    "Request received"
                );
                self.router.handle(&request).await
            }
            Err(e) => {
                tracing::warn!(connection_id = %id, peer_addr = %peer, error = %e, "Unparseable request");
                Response::bad_request()
            }
        };

        let (status, reason, body_len) = (response.status, response.reason, response.body.len());
        let wire = response.serialize();
        drop(response);

        match write_response(&mut stream, &wire).await {
            Ok(()) => tracing::info!(
                connection_id = %id,
                status,
                reason,
                body_len,
                "Response sent"
            ),
            Err(e) => tracing::warn!(
                connection_id = %id,
                status,
                error = %e,
                "Failed to write response"
            ),
        }
    }
}
