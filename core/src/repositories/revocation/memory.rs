//! In-memory implementation of RevocationStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::BlacklistEntry;
use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// Revocation store backed by a map, for tests and single-process setups
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of the entry stored for `token`
    pub async fn get(&self, token: &str) -> Option<BlacklistEntry> {
        self.entries
            .read()
            .await
            .get(token)
            .map(|expires_at| BlacklistEntry {
                token: token.to_string(),
                expires_at: *expires_at,
            })
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries
            .entry(token.to_string())
            .and_modify(|current| *current = (*current).max(expires_at))
            .or_insert(expires_at);
        Ok(())
    }

    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.entries.read().await.contains_key(token))
    }

    async fn purge(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, expires_at| *expires_at >= now);

        Ok((before - entries.len()) as u64)
    }
}
