//! In-memory implementation of CredentialStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{CredentialError, DomainError};

use super::r#trait::CredentialStore;

/// Credential store backed by a map, for tests and single-process setups
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(username) {
            return Err(CredentialError::Conflict {
                username: username.to_string(),
            }
            .into());
        }

        users.insert(username.to_string(), password_hash.to_string());
        Ok(())
    }

    async fn get_password_hash(&self, username: &str) -> Result<String, DomainError> {
        let users = self.users.read().await;
        users.get(username).cloned().ok_or_else(|| {
            CredentialError::NotFound {
                username: username.to_string(),
            }
            .into()
        })
    }
}
