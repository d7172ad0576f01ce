//! Configuration validation.
//!
//! Serde handles the syntax; this checks the values make sense together.
//! All problems are reported, not just the first one.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_host `{0}` is not an IPv4 address")]
    InvalidBindHost(String),

    #[error("listener.backlog must be greater than zero")]
    ZeroBacklog,

    #[error("static_files.root must not be empty")]
    EmptyStaticRoot,

    #[error("backend.host must not be empty")]
    EmptyBackendHost,

    #[error("backend.port must not be zero")]
    ZeroBackendPort,

    #[error("limits.{0} must be greater than zero")]
    ZeroBuffer(&'static str),

    #[error("timeouts.{0} must be greater than zero when set")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_host.parse::<Ipv4Addr>().is_err() {
        errors.push(ValidationError::InvalidBindHost(config.listener.bind_host.clone()));
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }
    if config.static_files.root.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyStaticRoot);
    }
    if config.backend.host.trim().is_empty() {
        errors.push(ValidationError::EmptyBackendHost);
    }
    if config.backend.port == 0 {
        errors.push(ValidationError::ZeroBackendPort);
    }

    let buffers = [
        ("request_buffer_bytes", config.limits.request_buffer_bytes),
        ("file_buffer_bytes", config.limits.file_buffer_bytes),
        ("backend_buffer_bytes", config.limits.backend_buffer_bytes),
    ];
    for (name, size) in buffers {
        if size == 0 {
            errors.push(ValidationError::ZeroBuffer(name));
        }
    }

    let timeouts = [
        ("client_read_secs", config.timeouts.client_read_secs),
        ("backend_connect_secs", config.timeouts.backend_connect_secs),
        ("backend_io_secs", config.timeouts.backend_io_secs),
    ];
    for (name, secs) in timeouts {
        if secs == Some(0) {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
