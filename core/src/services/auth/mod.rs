//! Authentication service module
//!
//! Composes the credential store, the token authority and the revocation
//! store into the register / login / revoke / authorize flows used by the
//! HTTP handlers.

mod hasher;
mod service;

#[cfg(test)]
mod tests;

pub use hasher::PasswordHasher;
pub use service::AuthService;
