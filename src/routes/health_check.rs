use actix_web::{http::StatusCode, web, HttpResponse};

use crate::utils::{get_pooled_connection, json_error, DbPool};

// Healthy only while a database connection can be checked out
#[tracing::instrument(
    "Checking if api is online",
    skip(pool)
)]
pub async fn health_check(pool: web::Data<DbPool>) -> HttpResponse{
    match get_pooled_connection(&pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => {
            tracing::error!(error = ?e, "Database unreachable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
