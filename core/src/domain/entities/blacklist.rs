//! Revoked token record kept until the token's own expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::token::Claims;

/// Entry of the revocation store, keyed by the raw token value
///
/// `expires_at` is always the token's own expiry, so an entry never
/// outlives the token it suppresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// Raw token value
    pub token: String,

    /// Expiry copied from the token's claims
    pub expires_at: DateTime<Utc>,
}

impl BlacklistEntry {
    /// Builds the entry for a validated token
    pub fn from_claims(token: impl Into<String>, claims: &Claims) -> Self {
        Self {
            token: token.into(),
            expires_at: claims.expires_at(),
        }
    }

    /// Whether a purge at `now` may delete this entry
    pub fn is_purgeable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
