//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, listen, accept)
//!     → connection.rs (one bounded read, one write, close)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - IPv4 only
//! - One connection open at a time; no pooling or reuse
//! - Buffer sizes are explicit configuration, truncation is logged

pub mod connection;
pub mod listener;

pub use connection::ConnectionId;
pub use listener::{Listener, ListenerError};
