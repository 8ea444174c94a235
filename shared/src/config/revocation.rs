//! Revocation store maintenance configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse, ConfigError};

/// What a blacklist lookup reports when the store cannot be reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailure {
    /// Treat the token as not revoked (availability first)
    #[default]
    FailOpen,
    /// Treat the token as revoked (deny on outage)
    FailClosed,
}

impl LookupFailure {
    /// Answer to give for a token whose blacklist lookup failed
    pub fn assumes_revoked(&self) -> bool {
        matches!(self, LookupFailure::FailClosed)
    }
}

impl std::str::FromStr for LookupFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail_open" | "open" => Ok(LookupFailure::FailOpen),
            "fail_closed" | "closed" => Ok(LookupFailure::FailClosed),
            _ => Err(format!("Invalid lookup failure policy: {}", s)),
        }
    }
}

/// Revocation (blacklist) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Seconds between two janitor sweeps of expired blacklist entries
    pub sweep_interval_secs: u64,

    /// Behaviour of blacklist lookups on storage failure
    #[serde(default)]
    pub lookup_failure: LookupFailure,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 3600, // Run every hour
            lookup_failure: LookupFailure::FailOpen,
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    ///
    /// An unrecognized `REVOCATION_LOOKUP_FAILURE` is rejected rather than
    /// replaced by the fail-open default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            sweep_interval_secs: env_or("REVOCATION_SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)
                .max(1),
            lookup_failure: env_parse("REVOCATION_LOOKUP_FAILURE", defaults.lookup_failure)?,
        })
    }
}
