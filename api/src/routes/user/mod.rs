//! User route handlers
//!
//! - Registration and login with username/password
//! - Token revocation
//! - Token validation including the blacklist check

pub mod login;
pub mod register;
pub mod revoke;
pub mod validate;

pub use login::login;
pub use register::register;
pub use revoke::revoke;
pub use validate::validate;
