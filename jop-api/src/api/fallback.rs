//! Unmatched routes

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Routes listed in the not-found response
pub const AVAILABLE_ENDPOINTS: [&str; 9] = [
    "GET /",
    "GET /episodes",
    "GET /episodes/<id>",
    "GET /episodes/filter",
    "POST /episodes/filter",
    "GET /colors",
    "GET /subjects",
    "GET /health",
    "GET /stats",
];

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "Endpoint not found",
            },
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
