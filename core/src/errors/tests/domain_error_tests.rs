//! Unit tests for the domain error taxonomy

use std::error::Error;
use std::io;

use crate::errors::{CredentialError, DomainError, StorageError, TokenError};

#[test]
fn test_token_error_is_transparent() {
    let error: DomainError = TokenError::Expired.into();
    assert_eq!(error.to_string(), "Token expired");
    assert_eq!(error.as_token_error(), Some(&TokenError::Expired));
}

#[test]
fn test_credential_error_messages() {
    let error: DomainError = CredentialError::Conflict {
        username: "alice".to_string(),
    }
    .into();
    assert_eq!(error.to_string(), "User already exists: alice");
    assert!(error.as_token_error().is_none());
}

#[test]
fn test_storage_error_keeps_source_chain() {
    let io_error = io::Error::new(io::ErrorKind::ConnectionReset, "peer reset");
    let error: DomainError = StorageError::new("revocation.add", io_error)
        .with_code("08006")
        .into();

    assert!(error.is_storage());

    let storage = error
        .source()
        .and_then(|e| e.downcast_ref::<StorageError>())
        .expect("storage error should be the direct source");
    assert_eq!(storage.operation(), "revocation.add");
    assert_eq!(storage.code(), Some("08006"));
    assert!(!storage.is_marked_transient());

    let root = storage
        .source()
        .and_then(|e| e.downcast_ref::<io::Error>())
        .expect("io error should be preserved");
    assert_eq!(root.kind(), io::ErrorKind::ConnectionReset);
}

#[test]
fn test_retries_exhausted_reports_attempts() {
    let last: DomainError = StorageError::new("revocation.purge", "database is down")
        .transient()
        .into();
    let error = DomainError::RetriesExhausted {
        attempts: 3,
        last: Box::new(last),
    };

    assert!(error.to_string().starts_with("Operation failed after 3 attempts"));
    assert!(error.is_storage());
}
