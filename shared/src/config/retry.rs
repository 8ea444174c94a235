//! Retry configuration for storage operations

use serde::{Deserialize, Serialize};

use super::env_or;

/// Upper bound on `max_attempts`; larger values are clamped
pub const MAX_RETRY_ATTEMPTS: u32 = 20;

/// Retry attempts and linear backoff for transient storage failures
///
/// The wait before attempt `n + 2` is `base_interval_ms + n * step_ms`,
/// so the defaults produce the schedule `[1s, 3s]` for three attempts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts including the first one (at least 1)
    pub max_attempts: u32,

    /// Wait before the second attempt, in milliseconds
    pub base_interval_ms: u64,

    /// Increase of every following wait, in milliseconds
    pub step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_interval_ms: 1000,
            step_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.max_attempts)
                .clamp(1, MAX_RETRY_ATTEMPTS),
            base_interval_ms: env_or("RETRY_BASE_INTERVAL_MS", defaults.base_interval_ms),
            step_ms: env_or("RETRY_STEP_MS", defaults.step_ms),
        }
    }
}
