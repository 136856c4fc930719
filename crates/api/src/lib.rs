//! Disease Prediction API Server
//!
//! Serves the symptom list and disease predictions over the artifacts
//! produced by the training job.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use feature_engine::SymptomSchema;
use inference_engine::{InferenceEngine, LabelEncoder, RandomForest};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use storage::ArtifactStore;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::{ApiError, ErrorResponse, StartupError};
pub use routes::predictions::PredictResponse;
pub use settings::ServiceConfig;

/// Application state shared across handlers
pub struct AppState {
    /// Loaded prediction path
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub symptom_count: usize,
    pub class_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/symptoms", get(routes::symptoms::get_symptoms))
        .route("/predict", post(routes::predictions::predict))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        symptom_count: state.engine.symptoms().len(),
        class_count: state.engine.class_count(),
    })
}

/// Initialize logging
pub fn init_logging(config: &ServiceConfig) -> Result<(), StartupError> {
    let level: Level = config
        .log_level
        .parse()
        .map_err(|_| StartupError::Logging(format!("Unknown log level: {}", config.log_level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Load the model, encoder and symptom list into an inference engine
pub fn load_engine(store: &ArtifactStore) -> Result<InferenceEngine, StartupError> {
    let forest: RandomForest = store.load_model().map_err(StartupError::Model)?;
    let encoder: LabelEncoder = store.load_encoder().map_err(StartupError::Model)?;
    let symptoms = store.load_symptoms().map_err(StartupError::Symptoms)?;

    Ok(InferenceEngine::new(
        SymptomSchema::new(symptoms),
        Box::new(forest),
        Box::new(encoder),
    ))
}

fn install_metrics_exporter(addr: &str) -> Result<(), StartupError> {
    let socket: SocketAddr = addr
        .parse()
        .map_err(|e| StartupError::Metrics(format!("invalid address {}: {}", addr, e)))?;

    PrometheusBuilder::new()
        .with_http_listener(socket)
        .install()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;

    info!("Prometheus exporter listening on {}", socket);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Serve the router on an already bound listener
pub async fn serve(listener: tokio::net::TcpListener, state: Arc<AppState>) -> Result<(), StartupError> {
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

/// Run the server
pub async fn run_server(config: ServiceConfig) -> Result<(), StartupError> {
    let store = ArtifactStore::in_dir(&config.artifact_dir);
    let engine = load_engine(&store)?;

    if let Some(addr) = &config.metrics_addr {
        install_metrics_exporter(addr)?;
    }

    let state = Arc::new(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;

    info!("Starting API server on {}", config.bind_addr);
    serve(listener, state).await
}
