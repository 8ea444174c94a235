//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{CredentialError, StorageError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Token, credential and storage failures are carried as typed variants so
/// callers can tell a bad token from an infrastructure outage. Storage errors
/// keep their source chain intact for the retry classifier.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Operation failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<DomainError>,
    },
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a configuration failure
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The token error carried by this error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the failure comes from the storage layer, directly or after
    /// exhausting retries
    pub fn is_storage(&self) -> bool {
        match self {
            DomainError::Storage(_) => true,
            DomainError::RetriesExhausted { last, .. } => last.is_storage(),
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
