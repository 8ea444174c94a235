//! Security module - password hashing and signing key loading

mod bcrypt_hasher;
mod env_secret;


pub use bcrypt_hasher::BcryptHasher;
pub use env_secret::{decode_secret, EnvSecretProvider, BASE64_PREFIX};
