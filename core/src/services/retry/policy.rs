//! Backoff policy for the retry executor

use std::time::Duration;

use tg_shared::config::{RetryConfig, MAX_RETRY_ATTEMPTS};

use crate::errors::DomainError;

/// Number of attempts and the waits between them
///
/// `backoff_schedule[i]` is the wait before attempt `i + 2`, so the schedule
/// always holds `max_attempts - 1` entries and never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_schedule: Vec<Duration>,
}

impl RetryPolicy {
    /// Build a policy from an explicit schedule
    ///
    /// # Returns
    /// * `Ok(RetryPolicy)` - Schedule is consistent with `max_attempts`
    /// * `Err(DomainError::Configuration)` - Zero attempts, wrong schedule
    ///   length or a decreasing schedule
    pub fn new(max_attempts: u32, backoff_schedule: Vec<Duration>) -> Result<Self, DomainError> {
        if max_attempts == 0 {
            return Err(DomainError::configuration(
                "Retry policy needs at least one attempt",
            ));
        }

        if backoff_schedule.len() != (max_attempts - 1) as usize {
            return Err(DomainError::configuration(format!(
                "Backoff schedule has {} entries, expected {}",
                backoff_schedule.len(),
                max_attempts - 1
            )));
        }

        if backoff_schedule.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DomainError::configuration(
                "Backoff schedule must be non-decreasing",
            ));
        }

        Ok(Self {
            max_attempts,
            backoff_schedule,
        })
    }

    /// Linear schedule: the first wait is `base`, every next wait adds `step`
    ///
    /// `max_attempts` is clamped to `1..=MAX_RETRY_ATTEMPTS`; waits saturate
    /// at `Duration::MAX` instead of overflowing.
    pub fn linear(max_attempts: u32, base: Duration, step: Duration) -> Self {
        let max_attempts = max_attempts.clamp(1, MAX_RETRY_ATTEMPTS);
        let backoff_schedule = (0..max_attempts - 1)
            .map(|i| {
                step.checked_mul(i)
                    .and_then(|offset| base.checked_add(offset))
                    .unwrap_or(Duration::MAX)
            })
            .collect();

        Self {
            max_attempts,
            backoff_schedule,
        }
    }

    /// Single attempt, no waits
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff_schedule: Vec::new(),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_schedule(&self) -> &[Duration] {
        &self.backoff_schedule
    }

    /// Wait before the given 1-based attempt; `None` for the first attempt
    /// and for attempts past the policy
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt < 2 {
            return None;
        }
        self.backoff_schedule.get((attempt - 2) as usize).copied()
    }

    /// Sum of all waits of a fully exhausted run
    pub fn total_backoff(&self) -> Duration {
        self.backoff_schedule
            .iter()
            .fold(Duration::ZERO, |total, wait| total.saturating_add(*wait))
    }
}

impl Default for RetryPolicy {
    /// Three attempts waiting 1s then 3s
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::linear(
            config.max_attempts,
            Duration::from_millis(config.base_interval_ms),
            Duration::from_millis(config.step_ms),
        )
    }
}
