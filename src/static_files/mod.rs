//! Static file subsystem.
//!
//! ```text
//! /static/<rel>  →  handler.rs  →  <root>/static/<rel>  →  200 | 403 | 404 | 500
//! ```

pub mod handler;

pub use handler::StaticFiles;
