//! End-to-end token lifecycle over the in-memory stores

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use tg_core::clock::{Clock, MockClock};
use tg_core::errors::{DomainError, TokenError};
use tg_core::repositories::{InMemoryCredentialStore, InMemoryRevocationStore};
use tg_core::services::{
    AuthService, PasswordHasher, RevocationJanitor, StaticSecret, TokenAuthority,
    TokenAuthorityConfig,
};

struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", password))
    }
}

struct Fixture {
    clock: MockClock,
    revocations: Arc<InMemoryRevocationStore>,
    auth: AuthService,
}

fn fixture() -> Fixture {
    let clock = MockClock::starting_now();
    let shared: Arc<dyn Clock> = Arc::new(clock.clone());
    let revocations = Arc::new(InMemoryRevocationStore::new());

    let authority = TokenAuthority::new(
        TokenAuthorityConfig::default(),
        &StaticSecret::new(b"lifecycle-secret-0123456789abcdefghij".to_vec()),
        shared.clone(),
    )
    .unwrap();

    let auth = AuthService::new(
        Arc::new(InMemoryCredentialStore::new()),
        revocations.clone(),
        Arc::new(PlainHasher),
        Arc::new(authority),
        shared,
    );

    Fixture {
        clock,
        revocations,
        auth,
    }
}

#[tokio::test]
async fn test_revoked_entry_is_purged_after_token_expiry() {
    let fx = fixture();
    fx.auth.register("alice", "s3cret").await.unwrap();
    let pair = fx.auth.login("alice", "s3cret").await.unwrap();

    fx.auth.revoke(&pair.access_token).await.unwrap();
    assert!(matches!(
        fx.auth.authorize(&pair.access_token).await,
        Err(DomainError::Token(TokenError::Revoked))
    ));
    assert_eq!(fx.revocations.len().await, 1);

    let janitor = RevocationJanitor::new(
        fx.revocations.clone(),
        Arc::new(fx.clock.clone()) as Arc<dyn Clock>,
    );

    // Still inside the token's lifetime: the entry must stay
    assert_eq!(janitor.sweep().await.unwrap(), 0);

    fx.clock.advance(Duration::minutes(16));
    assert_eq!(janitor.sweep().await.unwrap(), 1);
    assert!(fx.revocations.is_empty().await);

    // Once purged the token is rejected for expiry instead
    assert!(matches!(
        fx.auth.authorize(&pair.access_token).await,
        Err(DomainError::Token(TokenError::Expired))
    ));
}

#[tokio::test]
async fn test_refresh_token_survives_access_revocation_and_purge() {
    let fx = fixture();
    fx.auth.register("bob", "pw").await.unwrap();
    let pair = fx.auth.login("bob", "pw").await.unwrap();

    fx.auth.revoke(&pair.access_token).await.unwrap();
    fx.clock.advance(Duration::hours(1));

    let janitor = RevocationJanitor::new(
        fx.revocations.clone(),
        Arc::new(fx.clock.clone()) as Arc<dyn Clock>,
    );
    janitor.sweep().await.unwrap();

    let claims = fx.auth.authorize(&pair.refresh_token).await.unwrap();
    assert_eq!(claims.sub, "bob");
}
