// HTTP request handlers
pub mod evidence;
pub mod reports;
pub mod theories;
pub mod users;
pub mod votes;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
