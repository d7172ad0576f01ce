//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host, port, backlog).
    pub listener: ListenerConfig,

    /// Where `/static` paths are resolved.
    pub static_files: StaticFilesConfig,

    /// The single backend that receives `/api` traffic.
    pub backend: BackendConfig,

    /// Fixed read buffer sizes (truncation bounds).
    pub limits: LimitsConfig,

    /// Optional deadlines on blocking I/O.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IPv4 address to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// TCP port. 0 asks the OS for an ephemeral port.
    pub port: u16,

    /// Listen backlog.
    pub backlog: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
            backlog: 10,
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory the full request path is joined onto.
    pub root: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./public"),
        }
    }
}

/// Backend target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend hostname or IPv4 address.
    pub host: String,

    /// Backend port.
    pub port: u16,

    /// Value sent in the `Host` header of forwarded requests.
    pub host_header: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            host_header: "localhost".to_string(),
        }
    }
}

/// Buffer sizes for the three single-shot reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Bytes read from the client per request.
    pub request_buffer_bytes: usize,

    /// Bytes read from a static file.
    pub file_buffer_bytes: usize,

    /// Bytes read from the backend reply.
    pub backend_buffer_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_buffer_bytes: 4096,
            file_buffer_bytes: 4096,
            backend_buffer_bytes: 4096,
        }
    }
}

/// Timeout configuration. Unset means wait forever.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for reading the client request, in seconds.
    pub client_read_secs: Option<u64>,

    /// Deadline for connecting to the backend, in seconds.
    pub backend_connect_secs: Option<u64>,

    /// Deadline for each send/receive on the backend connection, in seconds.
    pub backend_io_secs: Option<u64>,
}

impl TimeoutConfig {
    pub fn client_read(&self) -> Option<Duration> {
        self.client_read_secs.map(Duration::from_secs)
    }

    pub fn backend_connect(&self) -> Option<Duration> {
        self.backend_connect_secs.map(Duration::from_secs)
    }

    pub fn backend_io(&self) -> Option<Duration> {
        self.backend_io_secs.map(Duration::from_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            port = 9000

            [backend]
            host = "127.0.0.1"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.backlog, 10);
        assert_eq!(config.backend.host, "127.0.0.1");
        assert_eq!(config.backend.port, 8000);
        assert_eq!(config.backend.host_header, "localhost");
        assert_eq!(config.limits.backend_buffer_bytes, 4096);
        assert!(config.timeouts.client_read().is_none());
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let timeouts = TimeoutConfig {
            client_read_secs: Some(3),
            backend_connect_secs: None,
            backend_io_secs: Some(1),
        };
        assert_eq!(timeouts.client_read(), Some(Duration::from_secs(3)));
        assert_eq!(timeouts.backend_connect(), None);
        assert_eq!(timeouts.backend_io(), Some(Duration::from_secs(1)));
    }
}
