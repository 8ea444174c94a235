//! # Token Guard API
//!
//! actix-web surface over the core authentication service: user
//! registration, login, token revocation and validation, plus a health
//! probe. The binary in `main.rs` wires configuration, the PostgreSQL
//! stores and the revocation janitor around it.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
