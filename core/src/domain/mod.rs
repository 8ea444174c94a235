//! Domain layer containing the token, blacklist and credential entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    BlacklistEntry, Claims, TokenKind, TokenPair, UserCredential, DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
    DEFAULT_REFRESH_TOKEN_TTL_SECONDS, TOKEN_TYPE_BEARER,
};
