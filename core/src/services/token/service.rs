//! Token authority implementation

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::Span;

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenAuthorityConfig;
use super::secret::SecretProvider;

/// Issues and validates signed tokens
///
/// Validation is local and pure: it checks signature, issuer and expiry
/// and never looks at the revocation store. Callers that authorize a
/// request must additionally check blacklist membership.
pub struct TokenAuthority {
    config: TokenAuthorityConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl TokenAuthority {
    /// Creates a new token authority
    ///
    /// # Arguments
    ///
    /// * `config` - Algorithm, lifetimes and issuer
    /// * `secrets` - Provider of the signing key, read once here
    /// * `clock` - Time source for issuance and expiry checks
    ///
    /// # Returns
    ///
    /// A new `TokenAuthority` or a configuration error if the config is
    /// invalid or the key cannot be obtained
    pub fn new(
        config: TokenAuthorityConfig,
        secrets: &dyn SecretProvider,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let key = secrets.signing_key()?;
        if key.is_empty() {
            return Err(DomainError::configuration("Signing key is empty"));
        }

        let encoding_key = EncodingKey::from_secret(&key);
        let decoding_key = DecodingKey::from_secret(&key);

        // Expiry is checked against the injected clock instead
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
            span: Span::none(),
        })
    }

    /// Log under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn config(&self) -> &TokenAuthorityConfig {
        &self.config
    }

    /// Issues an access and a refresh token for `subject`
    ///
    /// Both tokens share the issuance instant and differ in kind, TTL and
    /// token id.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The two signed tokens with their expiries
    /// * `Err(TokenError::SigningFailed)` - The signing primitive failed
    pub fn issue(&self, subject: &str) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();

        let access_claims = Claims::new(
            subject,
            TokenKind::Access,
            now,
            self.config.access_token_ttl,
            &self.config.issuer,
        );
        let refresh_claims = Claims::new(
            subject,
            TokenKind::Refresh,
            now,
            self.config.refresh_token_ttl,
            &self.config.issuer,
        );

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        tracing::info!(
            parent: &self.span,
            subject,
            access_jti = %access_claims.jti,
            refresh_jti = %refresh_claims.jti,
            "Issued token pair"
        );

        Ok(TokenPair::new(
            access_token,
            &access_claims,
            refresh_token,
            &refresh_claims,
        ))
    }

    /// Encodes claims into a JWT
    pub fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(parent: &self.span, error = %e, "Token signing failed");
            DomainError::Token(TokenError::SigningFailed {
                message: e.to_string(),
            })
        })
    }

    /// Verifies a token of either kind and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature and issuer verified, not yet expired
    /// * `Err(TokenError::Malformed)` - Not a parseable token
    /// * `Err(TokenError::BadSignature)` - Signature, algorithm or issuer mismatch
    /// * `Err(TokenError::Expired)` - `now >= exp`
    pub fn validate(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let mapped = map_jwt_error(e.kind());
                tracing::debug!(parent: &self.span, error = %e, reason = %mapped, "Token rejected");
                DomainError::Token(mapped)
            })?;

        let claims = token_data.claims;
        if claims.is_expired_at(self.clock.now()) {
            tracing::debug!(parent: &self.span, subject = %claims.sub, "Token expired");
            return Err(DomainError::Token(TokenError::Expired));
        }

        Ok(claims)
    }

    /// Verifies a token and requires it to be of `expected` kind
    pub fn validate_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, DomainError> {
        let claims = self.validate(token)?;
        if claims.kind != expected {
            return Err(DomainError::Token(TokenError::WrongKind {
                expected,
                found: claims.kind,
            }));
        }
        Ok(claims)
    }
}

/// Maps jsonwebtoken failures onto the token taxonomy
fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidIssuer => {
            TokenError::BadSignature
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish()
    }
}
