//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Client read / backend connect / backend send+receive:
//!     → timeouts.rs (enforce the configured deadline, if any)
//!     → On elapse: the caller maps it to its usual failure response
//! ```
//!
//! # Design Decisions
//! - Deadlines are opt-in; unset keeps the block-forever behavior
//! - No retries: one request, one backend attempt

pub mod timeouts;
