//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Token Guard. It
//! provides the concrete implementations behind the core traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL pool, migrations and store implementations using SQLx
//! - **Retry**: sqlx-aware transient failure predicate
//! - **Security**: bcrypt password hashing and environment secret loading

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Retry classification for sqlx failures
pub mod retry;

/// Security module - password hashing and signing key loading
pub mod security;

pub use database::{DatabasePool, PgCredentialStore, PgRevocationStore};
pub use retry::{default_classifier, SqlxTransportPredicate};
pub use security::{BcryptHasher, EnvSecretProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
