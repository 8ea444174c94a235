//! Token module for JWT issuance, validation and blacklist maintenance
//!
//! This module handles:
//! - Signing access and refresh tokens with an injected secret
//! - Validating signature, issuer and expiry against an injected clock
//! - Background purging of expired blacklist entries

mod config;
mod janitor;
mod secret;
mod service;


pub use config::TokenAuthorityConfig;
pub use janitor::{JanitorHandle, RevocationJanitor};
pub use secret::{SecretProvider, StaticSecret, MIN_SECRET_LENGTH};
pub use service::TokenAuthority;
