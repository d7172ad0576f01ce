//! Upstream (backend) subsystem.
//!
//! # Data Flow
//! ```text
//! /api request (method, stripped path, body)
//!     → forwarder.rs (build minimal HTTP/1.1 request)
//!     → connector.rs (resolve IPv4, connect)
//!     → one send, one receive, close
//!     → forwarder.rs (extract body, wrap in 200)
//! ```
//!
//! # Design Decisions
//! - Exactly one backend, fixed by configuration
//! - No pooling: a fresh connection per forwarded request
//! - Every failure stage maps to a 502

pub mod connector;
pub mod forwarder;

pub use connector::{connect_to_backend, ConnectError};
pub use forwarder::{ForwardError, Forwarder};
