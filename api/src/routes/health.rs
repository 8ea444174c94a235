use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports the database as `unavailable` (503) when the pool cannot answer.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.database {
        None => "not_configured",
        Some(pool) => match pool.ping().await {
            Ok(()) => "healthy",
            Err(_) => "unavailable",
        },
    };

    let body = serde_json::json!({
        "status": if database == "unavailable" { "degraded" } else { "healthy" },
        "service": "token-guard",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database == "unavailable" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
