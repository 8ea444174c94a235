//! Unit tests for retry policies

use std::time::Duration;

use tg_shared::config::{RetryConfig, MAX_RETRY_ATTEMPTS};

use crate::errors::DomainError;
use crate::services::retry::RetryPolicy;

#[test]
fn test_default_policy_schedule() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(
        policy.backoff_schedule(),
        &[Duration::from_secs(1), Duration::from_secs(3)]
    );
    assert_eq!(policy.total_backoff(), Duration::from_secs(4));
}

#[test]
fn test_linear_schedule_grows_by_step() {
    let policy = RetryPolicy::linear(5, Duration::from_millis(100), Duration::from_millis(50));

    assert_eq!(
        policy.backoff_schedule(),
        &[
            Duration::from_millis(100),
            Duration::from_millis(150),
            Duration::from_millis(200),
            Duration::from_millis(250),
        ]
    );
}

#[test]
fn test_delay_before_attempt() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.delay_before(1), None);
    assert_eq!(policy.delay_before(2), Some(Duration::from_secs(1)));
    assert_eq!(policy.delay_before(3), Some(Duration::from_secs(3)));
    assert_eq!(policy.delay_before(4), None);
}

#[test]
fn test_zero_attempts_raised_to_one() {
    let policy = RetryPolicy::linear(0, Duration::from_secs(1), Duration::from_secs(1));

    assert_eq!(policy.max_attempts(), 1);
    assert!(policy.backoff_schedule().is_empty());
    assert_eq!(policy, RetryPolicy::no_retry());
}

#[test]
fn test_new_rejects_inconsistent_schedules() {
    let zero = RetryPolicy::new(0, vec![]);
    assert!(matches!(zero, Err(DomainError::Configuration { .. })));

    let wrong_length = RetryPolicy::new(3, vec![Duration::from_secs(1)]);
    assert!(matches!(wrong_length, Err(DomainError::Configuration { .. })));

    let decreasing = RetryPolicy::new(3, vec![Duration::from_secs(3), Duration::from_secs(1)]);
    assert!(matches!(decreasing, Err(DomainError::Configuration { .. })));

    let flat = RetryPolicy::new(3, vec![Duration::from_secs(2), Duration::from_secs(2)]);
    assert!(flat.is_ok());
}

#[test]
fn test_policy_from_config() {
    let config = RetryConfig {
        max_attempts: 4,
        base_interval_ms: 500,
        step_ms: 250,
    };

    let policy = RetryPolicy::from(&config);

    assert_eq!(policy.max_attempts(), 4);
    assert_eq!(
        policy.backoff_schedule(),
        &[
            Duration::from_millis(500),
            Duration::from_millis(750),
            Duration::from_millis(1000),
        ]
    );
}

#[test]
fn test_linear_saturates_instead_of_overflowing() {
    let policy = RetryPolicy::linear(4, Duration::from_secs(1), Duration::MAX);

    assert_eq!(
        policy.backoff_schedule(),
        &[Duration::from_secs(1), Duration::MAX, Duration::MAX]
    );
    assert_eq!(policy.total_backoff(), Duration::MAX);
}

#[test]
fn test_linear_caps_attempts() {
    let policy = RetryPolicy::linear(u32::MAX, Duration::from_millis(10), Duration::ZERO);

    assert_eq!(policy.max_attempts(), MAX_RETRY_ATTEMPTS);
    assert_eq!(
        policy.backoff_schedule().len(),
        (MAX_RETRY_ATTEMPTS - 1) as usize
    );
}

#[test]
fn test_extreme_config_builds_bounded_policy() {
    let config = RetryConfig {
        max_attempts: 1_000_000,
        base_interval_ms: u64::MAX,
        step_ms: u64::MAX,
    };

    let policy = RetryPolicy::from(&config);

    assert_eq!(policy.max_attempts(), MAX_RETRY_ATTEMPTS);
    assert_eq!(policy.delay_before(2), Some(Duration::from_millis(u64::MAX)));
    assert_eq!(
        policy.delay_before(3),
        Duration::from_millis(u64::MAX).checked_mul(2)
    );
}
