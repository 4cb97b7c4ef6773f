use actix_web::{http::StatusCode, HttpRequest, HttpResponse};

use crate::utils::json_error;

// Fallback for every path no route matches
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::info!(path = %req.path(), "No route matched");
    json_error(StatusCode::NOT_FOUND, "Not found")
}
