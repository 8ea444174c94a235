//! Signing key providers

use crate::errors::DomainError;

/// Minimum accepted signing key length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Source of the HMAC signing key
///
/// Consulted once when the token authority is built.
pub trait SecretProvider: Send + Sync {
    fn signing_key(&self) -> Result<Vec<u8>, DomainError>;
}

/// Key handed over in memory
#[derive(Clone)]
pub struct StaticSecret {
    key: Vec<u8>,
}

impl StaticSecret {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl SecretProvider for StaticSecret {
    fn signing_key(&self) -> Result<Vec<u8>, DomainError> {
        if self.key.is_empty() {
            return Err(DomainError::configuration("Signing key is empty"));
        }
        Ok(self.key.clone())
    }
}

impl std::fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecret")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .finish()
    }
}
