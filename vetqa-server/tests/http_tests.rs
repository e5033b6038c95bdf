//! In-process router tests: engine results mapped onto HTTP statuses.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::util::ServiceExt;
use vetqa_core::{Embedder, EngineConfig, MatchEngine, Result};
use vetqa_server::{AppState, router};

const DIM: usize = 8;

/// One non-zero bucket per distinct first word; enough to separate rows.
struct FirstWordEmbedder;

#[async_trait]
impl Embedder for FirstWordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; DIM];
        let first = text.split_whitespace().next().unwrap_or("");
        let bucket = first.len() % DIM;
        vector[bucket] = 1.0;
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn dataset_file() -> NamedTempFile {
    let records = json!([
        {"question": "What is mastitis?", "answer": "An udder infection.", "disease": "Mastitis"},
        {"question": "How to treat fever?", "answer": "Rest and fluids.", "disease": "Fever"}
    ]);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(records.to_string().as_bytes()).unwrap();
    file
}

async fn ready_state(file: &NamedTempFile) -> AppState {
    let config = EngineConfig::builder()
        .dataset_path(file.path())
        .build()
        .unwrap();
    let mut engine = MatchEngine::new(config, Arc::new(FirstWordEmbedder));
    engine.ingest().await.unwrap();
    AppState { engine: Some(Arc::new(engine)) }
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn chat_returns_the_best_match() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response = app
        .oneshot(chat_request(json!({"message": "What about udders?", "language": "en"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "An udder infection.");
    assert_eq!(body["matched_question"], "What is mastitis?");
    assert_eq!(body["detected_disease"], "Mastitis");
    assert!(body["similarity_score"].is_number());
}

#[tokio::test]
async fn language_is_passed_through_unmodified() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response = app
        .oneshot(chat_request(json!({"message": "What is mastitis?", "language": "hi"})))
        .await
        .unwrap();

    let body = body_json(response.into_body()).await;
    assert_eq!(body["language"], "hi");
}

#[tokio::test]
async fn empty_message_is_a_400() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response = app.oneshot(chat_request(json!({"message": "   "}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn missing_message_field_is_a_400() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response = app.oneshot(chat_request(json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unready_engine_is_a_500() {
    let file = dataset_file();
    let config = EngineConfig::builder().dataset_path(file.path()).build().unwrap();
    // Constructed but never ingested.
    let engine = MatchEngine::new(config, Arc::new(FirstWordEmbedder));
    let app = router(AppState { engine: Some(Arc::new(engine)) });

    let response = app.oneshot(chat_request(json!({"message": "hello"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_model_is_a_500() {
    let app = router(AppState { engine: None });

    let response = app.oneshot(chat_request(json!({"message": "hello"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn health_reports_loaded_flags() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response =
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["dataset_loaded"], true);
}

#[tokio::test]
async fn health_reports_degraded_state() {
    let app = router(AppState { engine: None });

    let response =
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["dataset_loaded"], false);
}

#[tokio::test]
async fn root_reports_service_info() {
    let file = dataset_file();
    let app = router(ready_state(&file).await);

    let response =
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["dataset_size"], 2);
    assert_eq!(body["endpoints"]["chat"], "/chat (POST)");
}
