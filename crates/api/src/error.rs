//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use inference_engine::PredictError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;

/// Failures that abort server startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Failed to load the model or encoder: {0}")]
    Model(StorageError),
    #[error("Failed to load the symptoms list: {0}")]
    Symptoms(StorageError),
    #[error("Metrics exporter failed: {0}")]
    Metrics(String),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Request-scoped failures returned to clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or semantically invalid request (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unexpected failure while predicting (500)
    #[error("{0}")]
    Internal(String),
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Validation(e) => ApiError::Validation(e),
            PredictError::Inference(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
