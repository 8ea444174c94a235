//! # Token Guard Core
//!
//! Core token lifecycle logic and domain layer for the Token Guard backend.
//! This crate contains the domain entities, the error taxonomy, the store
//! interfaces with in-memory implementations, the token authority, the
//! retry executor with its error classifier, and the revocation janitor.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, MockClock, SystemClock};
pub use domain::{BlacklistEntry, Claims, TokenKind, TokenPair, UserCredential};
pub use errors::{CredentialError, DomainError, DomainResult, StorageError, TokenError};
pub use repositories::{
    CredentialStore, InMemoryCredentialStore, InMemoryRevocationStore, RevocationStore,
};
pub use services::{
    AuthService, ErrorCategory, ErrorClassifier, JanitorHandle, PasswordHasher, RetryError,
    RetryExecutor, RetryPolicy, RetryPredicate, RevocationJanitor, SecretProvider, StaticSecret,
    TokenAuthority, TokenAuthorityConfig,
};
