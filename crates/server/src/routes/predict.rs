use crate::error::{ServerError, ServerResult};
use crate::specialist::recommend_specialist;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use predictor::RankedDisease;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub disease: String,
    pub recommended_specialist: String,
    pub confidence: f32,
    pub top_predictions: Vec<RankedDisease>,
    pub matched_symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Predict a disease from a list of symptom strings.
///
/// An empty or missing list is rejected before the predictor is touched.
/// Inference runs on the blocking pool since the first call may train.
pub async fn predict_disease(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ServerResult<Json<PredictResponse>> {
    let Json(request) =
        payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    if request.symptoms.is_empty() {
        return Err(ServerError::BadRequest("No symptoms provided".to_string()));
    }

    let predictor = Arc::clone(&state.predictor);
    let symptoms = request.symptoms;
    let result = tokio::task::spawn_blocking(move || predictor.predict(&symptoms)).await??;

    tracing::debug!(
        disease = %result.prediction,
        matched = result.matched_symptoms.len(),
        "prediction served"
    );

    Ok(Json(PredictResponse {
        recommended_specialist: recommend_specialist(&result.prediction).to_string(),
        disease: result.prediction,
        confidence: result.confidence,
        top_predictions: result.top_predictions,
        matched_symptoms: result.matched_symptoms,
        warning: result.warning,
    }))
}
