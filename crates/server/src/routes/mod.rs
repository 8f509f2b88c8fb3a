//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `predict`: symptom-to-disease prediction

pub mod health;
pub mod predict;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service name and available endpoints.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "symptomatch",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/predict", "/health", "/ready"]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
