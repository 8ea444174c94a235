//! Mock implementations for testing the authentication service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::errors::{DomainError, StorageError};
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::auth::PasswordHasher;

/// Reversible "hash" so tests stay fast
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", password))
    }
}

/// Revocation store that can be switched offline and fails the first
/// `add_failures` inserts with a dropped connection
pub struct FlakyRevocationStore {
    pub inner: InMemoryRevocationStore,
    pub offline: AtomicBool,
    pub add_failures: AtomicU32,
    pub add_calls: AtomicU32,
}

impl FlakyRevocationStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRevocationStore::new(),
            offline: AtomicBool::new(false),
            add_failures: AtomicU32::new(0),
            add_calls: AtomicU32::new(0),
        }
    }

    fn unavailable(operation: &'static str) -> DomainError {
        StorageError::new(operation, "connection reset by peer")
            .with_code("08006")
            .into()
    }
}

#[async_trait]
impl RevocationStore for FlakyRevocationStore {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.add_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.add_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(Self::unavailable("revocation.add"));
        }
        self.inner.add(token, expires_at).await
    }

    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Self::unavailable("revocation.exists"));
        }
        self.inner.exists(token).await
    }

    async fn purge(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.inner.purge(now).await
    }
}
