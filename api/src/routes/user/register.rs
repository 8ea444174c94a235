use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CredentialsRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/user/register
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
/// - 201 Created: user stored
/// - 400 Bad Request: missing or empty fields
/// - 409 Conflict: username already taken
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .register(&request.username, &request.password)
        .await
    {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new("User registered")),
        Err(error) => {
            tracing::info!(username = %request.username, error = %error, "Registration rejected");
            handle_domain_error(&error)
        }
    }
}
