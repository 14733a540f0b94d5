//! GET / — health probe.

use axum::Json;
use serde::Serialize;

/// Fixed health message.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Handler: GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Backend running!".to_string(),
    })
}
