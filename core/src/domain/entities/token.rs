//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Token type reported to clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// The two token kinds issued together at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Immutable once created: the authority builds claims at issuance and
/// validation only ever reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username or service identity)
    pub sub: String,

    /// Token kind
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject` valid for `ttl` from `issued_at`
    ///
    /// Timestamps are truncated to whole seconds, so `exp - iat` always
    /// equals the TTL exactly.
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            kind,
            iat,
            exp: iat + ttl.num_seconds(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Issuance instant
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_default()
    }

    /// Expiry instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }

    /// Lifetime encoded in the claims
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.exp - self.iat)
    }

    /// A token is expired once `now >= exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Subject accessor
    pub fn subject(&self) -> &str {
        &self.sub
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,

    /// Access token expiry instant
    pub access_expires_at: DateTime<Utc>,

    /// Refresh token expiry instant
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Builds a pair from the two signed tokens and the claims they carry
    pub fn new(
        access_token: String,
        access_claims: &Claims,
        refresh_token: String,
        refresh_claims: &Claims,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            access_expires_in: access_claims.ttl().num_seconds(),
            refresh_expires_in: refresh_claims.ttl().num_seconds(),
            access_expires_at: access_claims.expires_at(),
            refresh_expires_at: refresh_claims.expires_at(),
        }
    }
}
