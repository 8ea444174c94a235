//! Business services containing domain logic and use cases.

pub mod auth;
pub mod retry;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, PasswordHasher};
pub use retry::{
    ErrorCategory, ErrorClassifier, RetryError, RetryExecutor, RetryPolicy, RetryPredicate,
};
pub use token::{
    JanitorHandle, RevocationJanitor, SecretProvider, StaticSecret, TokenAuthority,
    TokenAuthorityConfig,
};
