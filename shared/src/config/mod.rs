//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing and lifetime configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `retry` - Retry attempts and backoff schedule for storage operations
//! - `revocation` - Blacklist sweeping and lookup failure policy
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod retry;
pub mod revocation;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use retry::{RetryConfig, MAX_RETRY_ATTEMPTS};
pub use revocation::{LookupFailure, RevocationConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Retry configuration for storage operations
    #[serde(default)]
    pub retry: RetryConfig,

    /// Revocation store maintenance configuration
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            retry: RetryConfig::default(),
            revocation: RevocationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Fails when a setting that must not silently fall back to its default
    /// holds a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }
        logging.format = env_parse("LOG_FORMAT", logging.format)?;

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            retry: RetryConfig::from_env(),
            revocation: RevocationConfig::from_env()?,
            logging,
        })
    }
}

/// Configuration that cannot be loaded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read and parse an environment variable, falling back to `default`
/// when it is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read and parse an environment variable, falling back to `default` only
/// when it is unset. A value that is present but does not parse is an error.
pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_or(key, std::env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                reason: e.to_string(),
            }),
    }
}
