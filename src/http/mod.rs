//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → server.rs (single bounded read)
//!     → request.rs (parse method, path, body)
//!     → routing layer (static | api | 404)
//!     → response.rs (serialize status line, headers, body)
//!     → write, close
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{parse_request, ParseError, Request};
pub use response::Response;
pub use server::HttpServer;
