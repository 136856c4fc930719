//! Symptom Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::AppState;

/// List the symptom names in schema order
pub async fn get_symptoms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.engine.symptoms().to_vec())
}
