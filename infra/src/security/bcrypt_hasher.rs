//! bcrypt implementation of the PasswordHasher trait

use async_trait::async_trait;

use tg_core::errors::DomainError;
use tg_core::services::auth::PasswordHasher;

/// bcrypt hashing on the blocking thread pool
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Hasher with an explicit work factor (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

fn hashing_failed(e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(hashing_failed)?
            .map_err(hashing_failed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(hashing_failed)?
            .map_err(hashing_failed)
    }
}
