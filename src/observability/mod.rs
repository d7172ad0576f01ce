//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! listener, server, router, upstream, static_files
//!     → tracing events (connection_id, method, path, status)
//!     → logging.rs (fmt layer on stdout, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - The connection ID ties a request's events together

pub mod logging;

pub use logging::init_logging;
