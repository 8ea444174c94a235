//! Revocation store trait defining the interface for blacklist persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tg_shared::LookupFailure;

use crate::errors::DomainError;

/// Persisted set of revoked tokens keyed by the raw token value
///
/// Each operation must be atomic at the row level in the backing store.
/// No cross-task locking is layered on top: a purge racing a lookup can
/// only remove rows whose tokens already fail the expiry check of
/// `TokenAuthority::validate`.
///
/// # Security Considerations
/// - `expires_at` must be the token's own expiry, never a fresh TTL
/// - Entries whose `expires_at` is still in the future are never purged
/// - `contains` degrades according to a [`LookupFailure`] policy when the
///   store is unreachable; `FailOpen` keeps validation available during an
///   outage at the cost of honouring revocations issued before it
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a revoked token
    ///
    /// Idempotent upsert: re-adding the same token neither duplicates the
    /// entry nor shortens its expiry.
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Raw membership test that surfaces storage failures
    async fn exists(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete every entry with `expires_at < now`
    ///
    /// # Returns
    /// * `Ok(count)` - Number of entries removed
    /// * `Err(DomainError)` - Deletion failed
    async fn purge(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Membership test used on the request path
    ///
    /// A storage failure is logged and answered according to `on_failure`.
    async fn contains(&self, token: &str, on_failure: LookupFailure) -> bool {
        match self.exists(token).await {
            Ok(found) => found,
            Err(e) => {
                let assumed = on_failure.assumes_revoked();
                tracing::warn!(
                    error = %e,
                    policy = ?on_failure,
                    assumed_revoked = assumed,
                    "Blacklist lookup failed"
                );
                assumed
            }
        }
    }
}
