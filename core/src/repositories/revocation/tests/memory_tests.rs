//! Unit tests for the in-memory revocation store

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tg_shared::LookupFailure;

use crate::errors::{DomainError, StorageError};
use crate::repositories::revocation::{InMemoryRevocationStore, RevocationStore};

#[tokio::test]
async fn test_add_then_contains_until_purged() {
    let store = InMemoryRevocationStore::new();
    let now = Utc::now();
    let expires_at = now + Duration::minutes(15);

    store.add("token-1", expires_at).await.unwrap();
    assert!(store.contains("token-1", LookupFailure::FailOpen).await);

    // Purge before expiry keeps the entry
    assert_eq!(store.purge(now).await.unwrap(), 0);
    assert!(store.contains("token-1", LookupFailure::FailOpen).await);

    // Purge after expiry removes it
    let removed = store.purge(expires_at + Duration::seconds(1)).await.unwrap();
    assert_eq!(removed, 1);
    assert!(!store.contains("token-1", LookupFailure::FailOpen).await);
}

#[tokio::test]
async fn test_readding_same_token_is_idempotent() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::minutes(15);

    store.add("token-1", expires_at).await.unwrap();
    store.add("token-1", expires_at).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert!(store.exists("token-1").await.unwrap());
    assert_eq!(store.get("token-1").await.unwrap().expires_at, expires_at);
}

#[tokio::test]
async fn test_readding_never_shortens_expiry() {
    let store = InMemoryRevocationStore::new();
    let expires_at = Utc::now() + Duration::minutes(15);

    store.add("token-1", expires_at).await.unwrap();
    store.add("token-1", expires_at - Duration::minutes(10)).await.unwrap();

    assert_eq!(store.get("token-1").await.unwrap().expires_at, expires_at);
}

#[tokio::test]
async fn test_purge_keeps_future_and_boundary_entries() {
    let store = InMemoryRevocationStore::new();
    let now = Utc::now();

    store.add("expired", now - Duration::seconds(1)).await.unwrap();
    store.add("boundary", now).await.unwrap();
    store.add("future", now + Duration::hours(1)).await.unwrap();

    let removed = store.purge(now).await.unwrap();

    assert_eq!(removed, 1);
    assert!(!store.exists("expired").await.unwrap());
    assert!(store.exists("boundary").await.unwrap());
    assert!(store.exists("future").await.unwrap());
}

/// Store whose every lookup fails
struct UnreachableStore;

#[async_trait]
impl RevocationStore for UnreachableStore {
    async fn add(&self, _token: &str, _expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        Err(StorageError::new("revocation.add", "connection refused").transient().into())
    }

    async fn exists(&self, _token: &str) -> Result<bool, DomainError> {
        Err(StorageError::new("revocation.exists", "connection refused").transient().into())
    }

    async fn purge(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        Err(StorageError::new("revocation.purge", "connection refused").transient().into())
    }
}

#[tokio::test]
async fn test_lookup_failure_policy() {
    let store = UnreachableStore;

    assert!(!store.contains("token", LookupFailure::FailOpen).await);
    assert!(store.contains("token", LookupFailure::FailClosed).await);
}
