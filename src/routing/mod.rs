//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed Request (method, path, body)
//!     → router.rs (first path segment)
//!         "static" → static_files::StaticFiles
//!         "api"    → upstream::Forwarder (prefix stripped)
//!         other    → 404
//! ```
//!
//! # Design Decisions
//! - Deterministic: same path always takes the same route
//! - Failures in delegates become responses; nothing propagates out

pub mod router;

pub use router::{Route, Router};
