//! Main authentication service implementation

use std::sync::Arc;

use tg_shared::LookupFailure;
use tracing::Span;

use crate::clock::Clock;
use crate::domain::entities::{BlacklistEntry, Claims, TokenKind, TokenPair};
use crate::errors::{CredentialError, DomainError, TokenError};
use crate::repositories::{CredentialStore, RevocationStore};
use crate::services::retry::{RetryExecutor, RetryPolicy};
use crate::services::token::TokenAuthority;

use super::hasher::PasswordHasher;

/// Authentication flows over the token authority and the two stores
///
/// Storage calls go through the retry executor. Blacklist lookups on the
/// request path degrade according to the configured [`LookupFailure`]
/// policy instead of failing the request.
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    revocations: Arc<dyn RevocationStore>,
    hasher: Arc<dyn PasswordHasher>,
    authority: Arc<TokenAuthority>,
    clock: Arc<dyn Clock>,
    executor: RetryExecutor,
    policy: RetryPolicy,
    lookup_failure: LookupFailure,
    span: Span,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `credentials` - Store of username/password-hash records
    /// * `revocations` - Blacklist of revoked tokens
    /// * `hasher` - Password hashing primitive
    /// * `authority` - Token issuer and validator
    /// * `clock` - Time source
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
        hasher: Arc<dyn PasswordHasher>,
        authority: Arc<TokenAuthority>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            revocations,
            hasher,
            authority,
            clock,
            executor: RetryExecutor::default(),
            policy: RetryPolicy::default(),
            lookup_failure: LookupFailure::default(),
            span: Span::none(),
        }
    }

    pub fn with_retry(mut self, executor: RetryExecutor, policy: RetryPolicy) -> Self {
        self.executor = executor;
        self.policy = policy;
        self
    }

    /// Answer given for blacklist lookups that fail
    pub fn with_lookup_failure(mut self, policy: LookupFailure) -> Self {
        self.lookup_failure = policy;
        self
    }

    /// Log under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn authority(&self) -> &TokenAuthority {
        &self.authority
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Ok(())` - User stored
    /// * `Err(DomainError::Validation)` - Empty username or password
    /// * `Err(CredentialError::Conflict)` - Username taken, never retried
    pub async fn register(&self, username: &str, password: &str) -> Result<(), DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Username and password are required"));
        }

        let hash = self.hasher.hash(password).await?;

        let credentials = self.credentials.as_ref();
        let hash = hash.as_str();
        self.executor
            .execute(&self.policy, move || credentials.create_user(username, hash))
            .await?;

        tracing::info!(parent: &self.span, username, "User registered");
        Ok(())
    }

    /// Check credentials and issue a token pair
    ///
    /// Unknown users and wrong passwords both yield
    /// `CredentialError::InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::InvalidCredentials.into());
        }

        let credentials = self.credentials.as_ref();
        let stored = self
            .executor
            .execute(&self.policy, move || credentials.get_password_hash(username))
            .await
            .map_err(DomainError::from);

        let hash = match stored {
            Ok(hash) => hash,
            Err(DomainError::Credential(CredentialError::NotFound { .. })) => {
                tracing::info!(parent: &self.span, username, "Login for unknown user");
                return Err(CredentialError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &hash).await? {
            tracing::info!(parent: &self.span, username, "Login with wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        self.authority.issue(username)
    }

    /// Blacklist a token until its own expiry
    ///
    /// The token must still validate; its `exp` claim becomes the entry's
    /// expiry. Revoking an already revoked token succeeds again.
    pub async fn revoke(&self, token: &str) -> Result<BlacklistEntry, DomainError> {
        let claims = self.authority.validate(token)?;
        let entry = BlacklistEntry::from_claims(token, &claims);

        let revocations = self.revocations.as_ref();
        let expires_at = entry.expires_at;
        self.executor
            .execute(&self.policy, move || revocations.add(token, expires_at))
            .await?;

        tracing::info!(
            parent: &self.span,
            subject = %claims.sub,
            jti = %claims.jti,
            expires_at = %entry.expires_at,
            remaining_secs = (entry.expires_at - self.clock.now()).num_seconds(),
            "Token revoked"
        );
        Ok(entry)
    }

    /// Validate a token and check it against the blacklist
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Valid, unexpired and not revoked
    /// * `Err(TokenError)` - Malformed, bad signature, expired or revoked
    pub async fn authorize(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.authority.validate(token)?;
        self.ensure_not_revoked(token, claims).await
    }

    /// Same as [`authorize`](Self::authorize) but also requires a token kind
    pub async fn authorize_kind(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<Claims, DomainError> {
        let claims = self.authority.validate_kind(token, expected)?;
        self.ensure_not_revoked(token, claims).await
    }

    async fn ensure_not_revoked(&self, token: &str, claims: Claims) -> Result<Claims, DomainError> {
        if self.revocations.contains(token, self.lookup_failure).await {
            tracing::debug!(parent: &self.span, jti = %claims.jti, "Revoked token presented");
            return Err(TokenError::Revoked.into());
        }
        Ok(claims)
    }
}
