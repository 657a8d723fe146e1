//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the HTTP layer
//! ```
//!
//! Config is read once at process start. There is no reload.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_startup_config, ConfigError, UPSTREAM_BASE_ENV};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, UpstreamConfig};
pub use validation::ValidationError;
