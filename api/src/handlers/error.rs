//! Mapping of domain failures onto HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use tg_core::errors::{CredentialError, DomainError, TokenError};
use tg_shared::{error_codes, ErrorResponse};

fn respond(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Status, error code and client message for a token failure
pub fn token_error_parts(error: &TokenError) -> (StatusCode, &'static str, &'static str) {
    match error {
        TokenError::Expired => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Token has expired",
        ),
        TokenError::Revoked => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_REVOKED,
            "Token is revoked",
        ),
        TokenError::Malformed | TokenError::BadSignature | TokenError::WrongKind { .. } => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid token",
        ),
        TokenError::SigningFailed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Could not generate token",
        ),
    }
}

/// Convert a domain error into the JSON error response
///
/// Storage details never reach the client; they are logged here.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(e) => {
            let (status, code, message) = token_error_parts(e);
            respond(status, code, message)
        }
        DomainError::Credential(CredentialError::Conflict { .. }) => respond(
            StatusCode::CONFLICT,
            error_codes::CONFLICT,
            "Could not register user",
        ),
        DomainError::Credential(CredentialError::InvalidCredentials)
        | DomainError::Credential(CredentialError::NotFound { .. }) => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            "Invalid username or password",
        ),
        DomainError::Validation { message } => {
            respond(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::Storage(_) | DomainError::RetriesExhausted { .. } => {
            tracing::error!(error = %error, "Storage unavailable");
            respond(
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::SERVICE_UNAVAILABLE,
                "Storage temporarily unavailable",
            )
        }
        DomainError::Configuration { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Internal error");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            )
        }
    }
}

/// 400 response listing the fields that failed validation
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", field, detail)
        })
        .collect();
    fields.sort();

    respond(
        StatusCode::BAD_REQUEST,
        error_codes::VALIDATION_ERROR,
        fields.join("; "),
    )
}

/// Malformed JSON bodies become 400 with the shared error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid request body: {}", err);
    let response = respond(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message);
    actix_web::error::InternalError::from_response(err, response).into()
}
