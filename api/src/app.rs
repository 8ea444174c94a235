//! Application state and factory
//!
//! This module holds the shared application state and builds the
//! actix-web application with its routes and middleware.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use tg_core::services::AuthService;
use tg_infra::DatabasePool;
use tg_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::routes::{health, user};

/// Shared services handed to every handler
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    /// Pool probed by the health endpoint; absent with in-memory stores
    pub database: Option<DatabasePool>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self {
            auth_service,
            database: None,
        }
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/user")
                .route("/register", web::post().to(user::register))
                .route("/login", web::post().to(user::login))
                .route("/revoke", web::post().to(user::revoke))
                .route("/validate", web::post().to(user::validate)),
        )
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "The requested resource was not found",
            ))
        }))
}
