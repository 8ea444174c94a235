//! Password hashing primitive

use async_trait::async_trait;

use crate::errors::DomainError;

/// One-way password hashing, implemented outside the core
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
