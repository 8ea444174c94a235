//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides the database access layer including:
//! - Connection pool management and embedded migrations
//! - Credential and revocation store implementations
//! - Mapping of sqlx failures onto storage errors

pub mod connection;
pub mod errors;
pub mod postgres;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::{PgCredentialStore, PgRevocationStore};
