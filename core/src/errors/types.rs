//! Error type definitions for tokens, credentials and storage

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token cannot be parsed
    #[error("Malformed token")]
    Malformed,

    /// Signature verification failed or the algorithm does not match
    #[error("Invalid token signature")]
    BadSignature,

    /// The token's own expiry has passed
    #[error("Token expired")]
    Expired,

    /// The token is present in the revocation store
    #[error("Token revoked")]
    Revoked,

    #[error("Unexpected token kind: expected {expected}, found {found}")]
    WrongKind { expected: TokenKind, found: TokenKind },

    /// The signing primitive failed; never retried
    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },
}

/// Credential store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("User already exists: {username}")]
    Conflict { username: String },

    #[error("User not found: {username}")]
    NotFound { username: String },

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Failure reported by a storage backend
///
/// Carries the backend error as its source, the SQLSTATE code when the
/// backend reported one, and an optional explicit transient tag for
/// producers that already know the failure is temporary.
#[derive(Error, Debug)]
#[error("{operation} failed: {source}")]
pub struct StorageError {
    operation: &'static str,
    code: Option<String>,
    transient: bool,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StorageError {
    /// Wrap a backend error raised while running `operation`
    pub fn new(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            operation,
            code: None,
            transient: false,
            source: source.into(),
        }
    }

    /// Attach the backend's SQLSTATE code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark the failure as known to be temporary
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// SQLSTATE code reported by the backend, if any
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_marked_transient(&self) -> bool {
        self.transient
    }
}
