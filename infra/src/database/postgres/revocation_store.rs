//! PostgreSQL implementation of the RevocationStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tg_core::errors::DomainError;
use tg_core::repositories::RevocationStore;

use crate::database::errors::storage_error;

/// Revocation store over the `token_blacklist` table
///
/// Every operation is a single statement, so row-level atomicity comes
/// from PostgreSQL itself.
#[derive(Clone)]
pub struct PgRevocationStore {
    /// Database connection pool
    pool: PgPool,
}

impl PgRevocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for PgRevocationStore {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO token_blacklist (token, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (token) DO UPDATE
            SET expires_at = GREATEST(token_blacklist.expires_at, EXCLUDED.expires_at)
            "#,
        )
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("revocation.add", e))?;

        Ok(())
    }

    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE token = $1)")
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("revocation.exists", e))
    }

    async fn purge(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM token_blacklist WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revocation.purge", e))?;

        Ok(result.rows_affected())
    }
}
