//! Stored credential record.

use serde::{Deserialize, Serialize};

/// Username with its password hash, as persisted in `users_auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password_hash: String,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
