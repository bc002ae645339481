use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;
use symptom_predictor::{
    model::Predictor,
    server::{self, handlers::AppState},
};
use tempfile::TempDir;

/// Survey body whose expected feature vector is
/// `[28, 1, 30, 34, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0]`.
pub fn sample_record() -> Value {
    json!({
        "age": 28,
        "cycleLength": "30",
        "waist": "34",
        "Cycle(R/I)": "regular",
        "weightGain": "Y",
        "hairGrowth": "N",
        "skinDarkening": "Y",
        "hairLoss": "N",
        "pimples": "Y",
        "fastFood": "N",
        "regExercise": "Y",
        "bmi": "24"
    })
}

pub const SAMPLE_FEATURES: [f64; 14] = [
    28.0, 1.0, 30.0, 34.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0,
];

/// Logistic model that fires on weight gain plus pimples.
pub const LOGISTIC_MODEL_JSON: &str = r#"{
  "kind": "logistic_regression",
  "coefficients": [0, 0, 0, 0, 2.0, 0, 0, 0, 2.0, 0, 0, 0, 0, 0],
  "intercept": -3.0
}"#;

/// Single-tree forest splitting on weight gain and BMI category C.
pub const FOREST_MODEL_JSON: &str = r#"{
  "kind": "random_forest",
  "classes": [0, 1],
  "trees": [
    {
      "nodes": [
        { "feature": 4, "threshold": 0.5, "left": 1, "right": 2 },
        { "value": [9, 1] },
        { "feature": 13, "threshold": 0.5, "left": 3, "right": 4 },
        { "value": [3, 2] },
        { "value": [0, 4] }
      ]
    }
  ]
}"#;

pub fn create_app(predictor: Arc<dyn Predictor>) -> Router {
    server::router(AppState::new(predictor))
}

pub fn create_legacy_app(predictor: Arc<dyn Predictor>) -> Router {
    server::router(AppState {
        predictor,
        legacy_error_status: true,
    })
}

pub fn json_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/noreport")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a model artifact into `dir` and return its path
pub async fn write_model_file(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("model.json");
    tokio::fs::write(&path, content).await.unwrap();
    path.to_string_lossy().to_string()
}
