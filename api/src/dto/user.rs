use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::domain::entities::{Claims, TokenKind, TokenPair};

/// Body of register and login requests
///
/// `login` is accepted as an alias of `username`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(alias = "login")]
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 1024, message = "password must not be empty"))]
    pub password: String,
}

/// Body of revoke and validate requests
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "token must not be empty"))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for LoginResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
            expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub subject: String,
    pub token_kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

impl From<&Claims> for ValidateResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            token_kind: claims.kind,
            expires_at: claims.expires_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
