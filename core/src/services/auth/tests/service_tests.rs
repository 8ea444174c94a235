//! Unit tests for the authentication service

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::Duration;
use tg_shared::LookupFailure;

use crate::clock::MockClock;
use crate::domain::entities::TokenKind;
use crate::errors::{CredentialError, DomainError, TokenError};
use crate::repositories::{CredentialStore, InMemoryCredentialStore, RevocationStore};
use crate::services::auth::AuthService;
use crate::services::token::{StaticSecret, TokenAuthority, TokenAuthorityConfig};

use super::mocks::{FlakyRevocationStore, PlainHasher};

struct Fixture {
    service: AuthService,
    credentials: Arc<InMemoryCredentialStore>,
    revocations: Arc<FlakyRevocationStore>,
    clock: MockClock,
}

fn fixture() -> Fixture {
    let clock = MockClock::starting_now();
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let revocations = Arc::new(FlakyRevocationStore::new());
    let authority = TokenAuthority::new(
        TokenAuthorityConfig::default(),
        &StaticSecret::new("auth-service-test-key-0123456789abcdef"),
        Arc::new(clock.clone()),
    )
    .unwrap();

    let service = AuthService::new(
        credentials.clone(),
        revocations.clone(),
        Arc::new(PlainHasher),
        Arc::new(authority),
        Arc::new(clock.clone()),
    );

    Fixture {
        service,
        credentials,
        revocations,
        clock,
    }
}

fn token_error(error: DomainError) -> TokenError {
    match error {
        DomainError::Token(e) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_stores_hash() {
    let f = fixture();

    f.service.register("alice", "s3cret").await.unwrap();

    assert_eq!(
        f.credentials.get_password_hash("alice").await.unwrap(),
        "plain:s3cret"
    );
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let f = fixture();

    assert!(matches!(
        f.service.register("  ", "pw").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        f.service.register("alice", "").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_register_duplicate_conflicts_immediately() {
    let f = fixture();
    f.service.register("alice", "one").await.unwrap();
    let start = tokio::time::Instant::now();

    let result = f.service.register("alice", "two").await;

    assert!(matches!(
        result,
        Err(DomainError::Credential(CredentialError::Conflict { .. }))
    ));
    assert_eq!(start.elapsed(), std::time::Duration::ZERO);
}

#[tokio::test]
async fn test_login_issues_token_pair() {
    let f = fixture();
    f.service.register("alice", "s3cret").await.unwrap();

    let pair = f.service.login("alice", "s3cret").await.unwrap();
    let claims = f.service.authorize(&pair.access_token).await.unwrap();

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.kind, TokenKind::Access);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let f = fixture();
    f.service.register("alice", "s3cret").await.unwrap();

    let wrong_password = f.service.login("alice", "guess").await.unwrap_err();
    let unknown_user = f.service.login("bob", "s3cret").await.unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Credential(CredentialError::InvalidCredentials)
    ));
    assert!(matches!(
        unknown_user,
        DomainError::Credential(CredentialError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_revoke_blocks_authorization() {
    let f = fixture();
    f.service.register("alice", "s3cret").await.unwrap();
    let pair = f.service.login("alice", "s3cret").await.unwrap();

    let entry = f.service.revoke(&pair.access_token).await.unwrap();

    assert_eq!(entry.expires_at, pair.access_expires_at);
    assert_eq!(
        token_error(f.service.authorize(&pair.access_token).await.unwrap_err()),
        TokenError::Revoked
    );
    // Plain validation does not consult the blacklist
    assert!(f.service.authority().validate(&pair.access_token).is_ok());
    // Refresh token is unaffected
    assert!(f.service.authorize(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_twice_is_idempotent() {
    let f = fixture();
    let pair = f.service.authority().issue("alice").unwrap();

    f.service.revoke(&pair.access_token).await.unwrap();
    f.service.revoke(&pair.access_token).await.unwrap();

    assert_eq!(f.revocations.inner.len().await, 1);
    assert!(f.revocations.exists(&pair.access_token).await.unwrap());
}

#[tokio::test]
async fn test_revoke_rejects_invalid_token() {
    let f = fixture();

    let result = f.service.revoke("garbage").await;

    assert_eq!(token_error(result.unwrap_err()), TokenError::Malformed);
    assert_eq!(f.revocations.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_revoke_expired_token_is_rejected() {
    let f = fixture();
    let pair = f.service.authority().issue("alice").unwrap();
    f.clock.advance(Duration::minutes(16));

    let result = f.service.revoke(&pair.access_token).await;

    assert_eq!(token_error(result.unwrap_err()), TokenError::Expired);
}

#[tokio::test(start_paused = true)]
async fn test_revoke_retries_transient_store_failures() {
    let f = fixture();
    let pair = f.service.authority().issue("alice").unwrap();
    f.revocations.add_failures.store(2, Ordering::SeqCst);

    f.service.revoke(&pair.access_token).await.unwrap();

    assert_eq!(f.revocations.add_calls.load(Ordering::SeqCst), 3);
    assert!(f.revocations.exists(&pair.access_token).await.unwrap());
}

#[tokio::test]
async fn test_lookup_failure_fail_open_and_closed() {
    let f = fixture();
    let pair = f.service.authority().issue("alice").unwrap();
    f.revocations.offline.store(true, Ordering::SeqCst);

    // Default policy keeps requests flowing during an outage
    assert!(f.service.authorize(&pair.access_token).await.is_ok());

    let strict = f.service.with_lookup_failure(LookupFailure::FailClosed);
    assert_eq!(
        token_error(strict.authorize(&pair.access_token).await.unwrap_err()),
        TokenError::Revoked
    );
}

#[tokio::test]
async fn test_authorize_kind() {
    let f = fixture();
    let pair = f.service.authority().issue("alice").unwrap();

    assert!(f
        .service
        .authorize_kind(&pair.access_token, TokenKind::Access)
        .await
        .is_ok());
    assert!(matches!(
        token_error(
            f.service
                .authorize_kind(&pair.refresh_token, TokenKind::Access)
                .await
                .unwrap_err()
        ),
        TokenError::WrongKind { .. }
    ));
}
