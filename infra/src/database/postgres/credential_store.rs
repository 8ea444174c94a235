//! PostgreSQL implementation of the CredentialStore trait.

use async_trait::async_trait;
use sqlx::PgPool;

use tg_core::domain::entities::UserCredential;
use tg_core::errors::{CredentialError, DomainError};
use tg_core::repositories::CredentialStore;

use crate::database::errors::{credential_insert_error, storage_error};

/// Credential store over the `users_auth` table
#[derive(Clone)]
pub struct PgCredentialStore {
    /// Database connection pool
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full record for a user
    pub async fn find(&self, username: &str) -> Result<Option<UserCredential>, DomainError> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT username, password_hash
            FROM users_auth
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("credential.get_password_hash", e))?;

        Ok(row.map(|(username, password_hash)| UserCredential::new(username, password_hash)))
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users_auth (username, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| credential_insert_error(username, e))?;

        Ok(())
    }

    async fn get_password_hash(&self, username: &str) -> Result<String, DomainError> {
        self.find(username)
            .await?
            .map(|credential| credential.password_hash)
            .ok_or_else(|| {
                CredentialError::NotFound {
                    username: username.to_string(),
                }
                .into()
            })
    }
}
