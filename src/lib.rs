//! Minimal HTTP edge server.
//!
//! Serves static files under `/static`, forwards `/api` to a single fixed backend
//! and answers everything else with 404. One connection is handled at a time.

pub mod config;
pub mod http;
pub mod net;
pub mod routing;
pub mod static_files;
pub mod upstream;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
