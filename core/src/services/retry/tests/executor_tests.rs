//! Unit tests for the retry executor
//!
//! Time is paused so backoff sleeps complete instantly while
//! `tokio::time::Instant` still reports the virtual delay.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::{CredentialError, DomainError, StorageError};
use crate::services::retry::{RetryError, RetryExecutor, RetryPolicy};

fn transient() -> DomainError {
    StorageError::new("test.op", "connection lost")
        .with_code("08006")
        .into()
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_then_success() {
    let executor = RetryExecutor::default();
    let policy = RetryPolicy::default();
    let start = Instant::now();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let result = executor
        .execute(&policy, || {
            let calls = calls.clone();
            async move {
                let mut calls = calls.lock().unwrap();
                calls.push(start.elapsed());
                if calls.len() < 3 {
                    Err(transient())
                } else {
                    Ok("purged")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "purged");

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![Duration::ZERO, Duration::from_secs(1), Duration::from_secs(4)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_permanent_failure_returns_immediately() {
    let executor = RetryExecutor::default();
    let policy = RetryPolicy::default();
    let start = Instant::now();
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .execute(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(DomainError::from(CredentialError::Conflict {
                    username: "alice".to_string(),
                }))
            }
        })
        .await;

    assert!(matches!(
        result,
        Err(RetryError::Permanent(DomainError::Credential(CredentialError::Conflict { .. })))
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_unique_violation_is_not_retried() {
    let executor = RetryExecutor::default();
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .execute(&RetryPolicy::default(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(DomainError::from(
                    StorageError::new("credential.create", "duplicate key").with_code("23505"),
                ))
            }
        })
        .await;

    assert!(matches!(result, Err(RetryError::Permanent(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_reports_attempts_and_last_error() {
    let executor = RetryExecutor::default();
    let policy = RetryPolicy::default();
    let start = Instant::now();
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .execute(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

    let error = result.unwrap_err();
    assert!(error.is_exhausted());
    assert_eq!(error.attempts(), Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(4));

    let domain: DomainError = error.into();
    match domain {
        DomainError::RetriesExhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(last.is_storage());
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_retry_policy_runs_once() {
    let executor = RetryExecutor::default();
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .execute(&RetryPolicy::no_retry(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

    assert_eq!(result.unwrap_err().attempts(), Some(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_does_not_block_other_tasks() {
    let executor = RetryExecutor::default();
    let start = Instant::now();

    let retrying = tokio::spawn(async move {
        let _: Result<(), _> = executor
            .execute(&RetryPolicy::default(), || async { Err(transient()) })
            .await;
        start.elapsed()
    });

    let other = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        start.elapsed()
    });

    assert_eq!(other.await.unwrap(), Duration::from_millis(500));
    assert_eq!(retrying.await.unwrap(), Duration::from_secs(4));
}
