//! Domain entities representing core business objects.

pub mod blacklist;
pub mod credential;
pub mod token;


// Re-export commonly used types
pub use blacklist::BlacklistEntry;
pub use credential::UserCredential;
pub use token::{
    Claims, TokenKind, TokenPair, DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
    DEFAULT_REFRESH_TOKEN_TTL_SECONDS, TOKEN_TYPE_BEARER,
};
