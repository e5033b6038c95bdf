//! HTTP front end for the vetqa match engine.
//!
//! Plumbing only: parse the request, call the engine, map its result onto an
//! HTTP status. All retrieval logic lives in `vetqa-core`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use vetqa_core::{EngineConfig, MatchEngine, MatchError};

pub mod config;

pub use config::ServerConfig;

/// Shared request state.
///
/// `engine` is `None` only when the embedding model itself failed to load;
/// an engine whose ingest failed is still present so health can report the
/// partial state (model yes, dataset no).
#[derive(Clone)]
pub struct AppState {
    pub engine: Option<Arc<MatchEngine>>,
}

/// Construct the engine and run its one-shot ingest.
///
/// Initialization failures are logged and absorbed: the process keeps
/// serving so `/health` can report what went wrong, matching the startup
/// contract of the engine.
pub async fn build_state(config: EngineConfig) -> AppState {
    match vetqa_core::FastEmbedder::new() {
        Ok(embedder) => {
            let mut engine = MatchEngine::new(config, Arc::new(embedder));
            if let Err(e) = engine.ingest().await {
                error!(error = %e, "initialization failed; serving in degraded mode");
            }
            AppState { engine: Some(Arc::new(engine)) }
        }
        Err(e) => {
            error!(error = %e, "embedding model failed to load; serving in degraded mode");
            AppState { engine: None }
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
    /// Passed through unmodified; no matching behavior depends on it.
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    "en".to_string()
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let dataset_size = state.engine.as_ref().map(|e| e.dataset_size()).unwrap_or(0);
    Json(json!({
        "service": "Veterinary Chatbot API",
        "status": "running",
        "model": vetqa_core::local::MODEL_NAME,
        "dataset_size": dataset_size,
        "endpoints": {
            "health": "/health",
            "chat": "/chat (POST)"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let model_loaded = state.engine.is_some();
    let dataset_loaded =
        state.engine.as_ref().map(|e| e.dataset_size() > 0).unwrap_or(false);
    Json(json!({
        "status": "ok",
        "message": "Chatbot service is running",
        "model_loaded": model_loaded,
        "dataset_loaded": dataset_loaded,
    }))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let Some(engine) = state.engine.as_ref() else {
        return error_response(&MatchError::NotReady);
    };

    match engine.query(&request.message).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "response": result.answer,
                "matched_question": result.question,
                "detected_disease": result.label,
                "similarity_score": result.score,
                "status": "success",
                "language": request.language,
            })),
        ),
        Err(e) => error_response(&e),
    }
}

/// Map an engine error onto the HTTP surface: caller errors are 400-class,
/// everything else is a server fault.
fn error_response(error: &MatchError) -> (StatusCode, Json<serde_json::Value>) {
    let status = if error.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": error.to_string(), "status": "error" })))
}
