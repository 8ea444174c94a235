//! Shared configuration and common types for the Token Guard server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, LookupFailure, RetryConfig, RevocationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
