use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CredentialsRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/user/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900,
///     "refresh_expires_in": 604800,
///     "expires_at": "2024-03-01T09:15:00Z",
///     "refresh_expires_at": "2024-03-08T09:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing fields
/// - 401 Unauthorized: unknown user or wrong password
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(LoginResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
