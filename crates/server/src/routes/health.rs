use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use predictor::ModelStatus;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "symptom-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// 200 once a model is loaded or trained, 503 otherwise. Never waits on a
/// load or training run in progress.
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> ServerResult<Json<Value>> {
    let model = match state.predictor.try_status() {
        Some(model @ (ModelStatus::Loaded | ModelStatus::Trained)) => model,
        _ if state.predictor.is_training() => {
            return Err(ServerError::ModelNotReady("training".to_string()))
        }
        Some(other) => return Err(ServerError::ModelNotReady(other.as_str().to_string())),
        None => return Err(ServerError::ModelNotReady("updating".to_string())),
    };

    Ok(Json(json!({
        "status": "ready",
        "service": "symptom-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "model": model,
        }
    })))
}
