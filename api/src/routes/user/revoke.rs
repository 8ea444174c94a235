use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{MessageResponse, TokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/user/revoke
///
/// Blacklists the token until its own expiry. The token must still be
/// valid; revoking an already revoked token succeeds.
///
/// # Response
/// - 200 OK: token revoked
/// - 400 Bad Request: missing token
/// - 401 Unauthorized: malformed, forged or expired token
/// - 503 Service Unavailable: blacklist unreachable after retries
pub async fn revoke(state: web::Data<AppState>, request: web::Json<TokenRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.revoke(&request.token).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("Token successfully revoked")),
        Err(error) => handle_domain_error(&error),
    }
}
