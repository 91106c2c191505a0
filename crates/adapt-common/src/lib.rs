//! # adapt-common
//!
//! Shared utilities: the server address catalog, token parsing, client
//! configuration, and telemetry bootstrap.

pub mod config;
pub mod server;
pub mod telemetry;
pub mod token;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, ConfigError};
pub use server::ServerConfig;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
pub use token::{user_id_from_token, TokenError};
