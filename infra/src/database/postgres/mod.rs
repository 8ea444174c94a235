//! PostgreSQL store implementations

mod credential_store;
mod revocation_store;

pub use credential_store::PgCredentialStore;
pub use revocation_store::PgRevocationStore;
