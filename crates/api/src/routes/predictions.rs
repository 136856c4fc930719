//! Prediction Routes

use axum::{body::Bytes, extract::State, Json};
use data_validator::ValidationError;
use inference_engine::PredictError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub message: String,
    pub disease: String,
    pub confidence: f64,
}

/// Predict a disease from a JSON symptom map.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// every malformed body maps onto the same validation error.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let input: Value = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            debug!("Rejected unparseable body: {}", e);
            metrics::counter!("disease_predictions_total", "outcome" => "invalid").increment(1);
            return Err(ValidationError::InvalidFormat.into());
        }
    };

    match state.engine.predict(&input) {
        Ok(result) => {
            metrics::counter!("disease_predictions_total", "outcome" => "ok").increment(1);
            metrics::histogram!("disease_prediction_latency_seconds")
                .record(result.latency.as_secs_f64());

            let diagnosis = result.diagnosis;
            Ok(Json(PredictResponse {
                message: diagnosis.message(),
                disease: diagnosis.disease,
                confidence: diagnosis.confidence,
            }))
        }
        Err(PredictError::Validation(e)) => {
            warn!("Invalid prediction request: {}", e);
            metrics::counter!("disease_predictions_total", "outcome" => "invalid").increment(1);
            Err(e.into())
        }
        Err(e) => {
            error!("Error: {}", e);
            metrics::counter!("disease_predictions_total", "outcome" => "error").increment(1);
            Err(e.into())
        }
    }
}
