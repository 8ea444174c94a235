//! Mapping of sqlx failures onto the domain error taxonomy

use tg_core::errors::{CredentialError, DomainError, StorageError};

/// SQLSTATE reported by the database, if the failure came from the server
pub fn sqlstate(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

/// Wrap a sqlx failure raised by `operation`
pub fn storage_error(operation: &'static str, error: sqlx::Error) -> DomainError {
    let code = sqlstate(&error);
    tracing::debug!(operation, code = ?code, error = %error, "Storage operation failed");

    let storage = StorageError::new(operation, error);
    match code {
        Some(code) => storage.with_code(code).into(),
        None => storage.into(),
    }
}

/// Like [`storage_error`], but a unique violation on insert means the
/// username is taken
pub fn credential_insert_error(username: &str, error: sqlx::Error) -> DomainError {
    let is_unique_violation = error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if is_unique_violation {
        return CredentialError::Conflict {
            username: username.to_string(),
        }
        .into();
    }

    storage_error("credential.create_user", error)
}
