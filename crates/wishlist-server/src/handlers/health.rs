use axum::{http::StatusCode, Json};

/// Health check endpoint.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Catch-all for routes the fallback application does not serve.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
