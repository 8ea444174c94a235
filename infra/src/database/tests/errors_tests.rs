//! Unit tests for sqlx error mapping

use std::error::Error;
use std::io;

use tg_core::errors::DomainError;

use crate::database::errors::{credential_insert_error, sqlstate, storage_error};

#[test]
fn test_storage_error_keeps_sqlx_source() {
    let error = storage_error("revocation.purge", sqlx::Error::PoolTimedOut);

    let storage = match &error {
        DomainError::Storage(storage) => storage,
        other => panic!("expected storage error, got {:?}", other),
    };
    assert_eq!(storage.operation(), "revocation.purge");
    assert_eq!(storage.code(), None);

    let source = storage.source().unwrap();
    assert!(matches!(
        source.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::PoolTimedOut)
    ));
}

#[test]
fn test_io_failure_reaches_chain() {
    let error = storage_error(
        "revocation.exists",
        sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused)),
    );

    let found = tg_core::services::retry::error_chain(&error)
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::ConnectionRefused);
    assert!(found);
}

#[test]
fn test_non_database_errors_have_no_sqlstate() {
    assert_eq!(sqlstate(&sqlx::Error::RowNotFound), None);
    assert_eq!(sqlstate(&sqlx::Error::PoolClosed), None);
}

#[test]
fn test_credential_insert_without_violation_is_storage() {
    let error = credential_insert_error("alice", sqlx::Error::PoolClosed);

    assert!(error.is_storage());
    assert!(matches!(error, DomainError::Storage(ref s) if s.operation() == "credential.create_user"));
}
