use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{TokenRequest, ValidateResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/user/validate
///
/// Checks signature and expiry, then the blacklist.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "subject": "alice", "token_kind": "access", "expires_at": "2024-03-01T09:15:00Z" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing token
/// - 401 Unauthorized: `TOKEN_INVALID`, `TOKEN_EXPIRED` or `TOKEN_REVOKED`
pub async fn validate(
    state: web::Data<AppState>,
    request: web::Json<TokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.authorize(&request.token).await {
        Ok(claims) => HttpResponse::Ok().json(ValidateResponse::from(&claims)),
        Err(error) => handle_domain_error(&error),
    }
}
