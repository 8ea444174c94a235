//! Signing key loaded from the environment

use base64::{engine::general_purpose::STANDARD, Engine as _};

use tg_core::errors::DomainError;
use tg_core::services::token::{SecretProvider, MIN_SECRET_LENGTH};
use tg_shared::JwtConfig;

/// Marks a secret value holding base64 encoded key bytes
pub const BASE64_PREFIX: &str = "base64:";

/// Reads the signing key from a named environment variable
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var_name: String,
}

impl EnvSecretProvider {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    /// Provider for the variable named in the JWT configuration
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret_env.clone())
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_key(&self) -> Result<Vec<u8>, DomainError> {
        let raw = std::env::var(&self.var_name).map_err(|_| {
            DomainError::configuration(format!(
                "Signing secret variable {} is not set",
                self.var_name
            ))
        })?;

        decode_secret(&raw)
    }
}

/// Turn a configured secret into key bytes
///
/// Values starting with `base64:` are decoded, anything else is used as
/// UTF-8 bytes. The result must hold at least [`MIN_SECRET_LENGTH`] bytes.
pub fn decode_secret(raw: &str) -> Result<Vec<u8>, DomainError> {
    let raw = raw.trim();

    let key = match raw.strip_prefix(BASE64_PREFIX) {
        Some(encoded) => STANDARD
            .decode(encoded)
            .map_err(|e| DomainError::configuration(format!("Invalid base64 signing secret: {}", e)))?,
        None => raw.as_bytes().to_vec(),
    };

    if key.is_empty() {
        return Err(DomainError::configuration("Signing secret is empty"));
    }

    if key.len() < MIN_SECRET_LENGTH {
        return Err(DomainError::configuration(format!(
            "Signing secret must be at least {} bytes, got {}",
            MIN_SECRET_LENGTH,
            key.len()
        )));
    }

    Ok(key)
}
