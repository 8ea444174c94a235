//! Credential store trait defining the interface for username/password-hash persistence.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Store of `username -> password hash` records
///
/// Hashing and comparison happen outside the store; implementations only
/// persist and return the opaque hash string.
///
/// # Example
/// ```no_run
/// # use tg_core::repositories::CredentialStore;
/// # async fn example(store: &impl CredentialStore) -> Result<(), Box<dyn std::error::Error>> {
/// store.create_user("alice", "$2b$12$...").await?;
/// let hash = store.get_password_hash("alice").await?;
/// println!("stored hash: {}", hash);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a new user record
    ///
    /// # Returns
    /// * `Ok(())` - Record created
    /// * `Err(DomainError::Credential(CredentialError::Conflict))` - Username already exists
    /// * `Err(DomainError::Storage)` - Backend failure
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), DomainError>;

    /// Fetch the stored password hash for a user
    ///
    /// # Returns
    /// * `Ok(hash)` - The stored hash
    /// * `Err(DomainError::Credential(CredentialError::NotFound))` - No such user
    /// * `Err(DomainError::Storage)` - Backend failure
    async fn get_password_hash(&self, username: &str) -> Result<String, DomainError>;
}
