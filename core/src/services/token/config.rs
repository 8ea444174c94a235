//! Configuration for the token authority

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tg_shared::JwtConfig;

use crate::domain::entities::token::{
    TokenKind, DEFAULT_ACCESS_TOKEN_TTL_SECONDS, DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
};
use crate::errors::DomainError;

/// Configuration for the token authority
#[derive(Debug, Clone)]
pub struct TokenAuthorityConfig {
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Value of the `iss` claim, checked on validation
    pub issuer: String,
}

impl Default for TokenAuthorityConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            refresh_token_ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECONDS),
            issuer: "token-guard".to_string(),
        }
    }
}

impl TokenAuthorityConfig {
    /// Build from the shared JWT configuration
    ///
    /// # Returns
    /// * `Ok(TokenAuthorityConfig)` - Valid configuration
    /// * `Err(DomainError::Configuration)` - Unknown or asymmetric algorithm,
    ///   or a non-positive TTL
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&config.algorithm.to_uppercase()).map_err(|_| {
            DomainError::configuration(format!("Unknown JWT algorithm: {}", config.algorithm))
        })?;

        let built = Self {
            algorithm,
            access_token_ttl: Duration::seconds(config.access_token_expiry),
            refresh_token_ttl: Duration::seconds(config.refresh_token_expiry),
            issuer: config.issuer.clone(),
        };
        built.validate()?;
        Ok(built)
    }

    /// Check algorithm family and lifetimes
    pub fn validate(&self) -> Result<(), DomainError> {
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::configuration(format!(
                "Unsupported JWT algorithm {:?}: only HS256, HS384 and HS512 are supported",
                self.algorithm
            )));
        }

        if self.access_token_ttl <= Duration::zero() || self.refresh_token_ttl <= Duration::zero() {
            return Err(DomainError::configuration("Token lifetimes must be positive"));
        }

        if self.issuer.trim().is_empty() {
            return Err(DomainError::configuration("JWT issuer must not be empty"));
        }

        Ok(())
    }

    /// Lifetime configured for a token kind
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }
}
