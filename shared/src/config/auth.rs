//! Token signing and lifetime configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// JWT configuration
///
/// The signing secret is deliberately absent: only the name of the
/// environment variable that holds it is configured here, and the secret
/// itself is resolved by a secret provider when the token authority is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Name of the environment variable holding the signing secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("token-guard"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();

        Self {
            jwt: JwtConfig {
                secret_env: std::env::var("JWT_SECRET_ENV").unwrap_or(defaults.secret_env),
                access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
                refresh_token_expiry: env_or(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    defaults.refresh_token_expiry,
                ),
                issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
                algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            },
        }
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

fn default_secret_env() -> String {
    String::from("JWT_SECRET")
}

fn default_algorithm() -> String {
    String::from("HS256")
}
