//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)          CLI flags (main.rs)
//!     → loader.rs (parse)         → override fields
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → owned by HttpServer for the life of the process
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No reload: the server is stateless and a restart is cheap

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_toml, load_config, parse_config, read_config, ConfigError};
pub use schema::{
    BackendConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, ServerConfig,
    StaticFilesConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
