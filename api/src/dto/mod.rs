//! Request and response bodies

pub mod user;

pub use user::{
    CredentialsRequest, LoginResponse, MessageResponse, TokenRequest, ValidateResponse,
};
