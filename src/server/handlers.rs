use super::types::{ErrorResponse, PredictionResponse};
use crate::{
    Error, Result,
    error::ErrorKind,
    features,
    model::Predictor,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const UNSUPPORTED_MEDIA_TYPE_MESSAGE: &str =
    "415 Unsupported Media Type: Content-Type must be application/json";

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    /// Report unexpected failures with 200 instead of 500.
    pub legacy_error_status: bool,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            legacy_error_status: false,
        }
    }
}

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn noreport(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> std::result::Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match predict(&state, &headers, &body).await {
        Ok(response) => {
            info!("Prediction served: {:?}", response.predictions);
            Ok(Json(response))
        }
        Err(e) => Err(error_response(&e, state.legacy_error_status)),
    }
}

async fn predict(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<PredictionResponse> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    info!("Content-Type: {}", content_type.unwrap_or("<none>"));

    if !content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE)) {
        return Err(Error::unsupported_media_type(UNSUPPORTED_MEDIA_TYPE_MESSAGE));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| Error::invalid_input("body", format!("malformed JSON: {}", e)))?;
    info!("Received data: {}", payload);

    let (features, category) = features::extract(&payload)?;
    debug!("Feature vector: {:?}", features.named().collect::<Vec<_>>());

    let predictions = state
        .predictor
        .predict(&features)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::Internal => e,
            _ => Error::internal(e.to_string()),
        })?;

    PredictionResponse::new(predictions, category)
}

/// Maps an error onto the status code and JSON body returned to the client.
pub fn error_response(err: &Error, legacy_error_status: bool) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match err.kind() {
        ErrorKind::InvalidInput => {
            warn!("Rejected request: {}", err);
            (StatusCode::BAD_REQUEST, format!("Invalid input data: {}", err))
        }
        ErrorKind::UnsupportedMediaType => {
            warn!("Rejected request: {}", err);
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
        }
        ErrorKind::Internal => {
            error!("Failed to serve prediction: {}", err);
            let status = if legacy_error_status {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, err.to_string())
        }
    };
    (status, Json(ErrorResponse { error: message }))
}
