use std::{collections::BTreeMap, sync::Arc};

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use shared::{
    domain::InputText,
    error::ErrorBody,
    protocol::{HealthResponse, PredictResponse, ServiceInfo, PREDICT_ROUTE},
};
use tracing::{error, info};

use crate::{app_state::AppState, model::LabelModelError};

pub(crate) const MODEL_NOT_LOADED: &str =
    "Model components not loaded. Please ensure all model files are present.";
pub(crate) const NO_TWEET_PROVIDED: &str = "No tweet text provided";
pub(crate) const TWEET_EMPTY: &str = "Tweet text is empty";

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

fn reject(status: StatusCode, body: ErrorBody) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(body))
}

pub(crate) async fn service_info() -> Json<ServiceInfo> {
    let mut endpoints = BTreeMap::new();
    endpoints.insert(
        PREDICT_ROUTE.to_string(),
        "POST - Classify tweet informativeness".to_string(),
    );
    Json(ServiceInfo {
        message: "Tweet Informativeness Classifier API".to_string(),
        status: "running".to_string(),
        endpoints,
    })
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_status: state.model_status(),
    })
}

/// Reads `tweet` leniently: a missing body, invalid JSON, or a non-string
/// `tweet` all count as "not provided".
fn tweet_field(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("tweet")?.as_str().map(str::to_string)
}

pub(crate) async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<PredictResponse> {
    let Some(classifier) = state.classifier.clone() else {
        error!("predict called without a loaded model");
        return Err(reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(MODEL_NOT_LOADED),
        ));
    };

    let tweet = tweet_field(&body)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, ErrorBody::new(NO_TWEET_PROVIDED)))?;
    let tweet = InputText::parse(&tweet)
        .map_err(|_| reject(StatusCode::BAD_REQUEST, ErrorBody::new(TWEET_EMPTY)))?;

    // Inference is CPU-bound; a panicking model surfaces as a failed prediction.
    let text = tweet.as_str().to_string();
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&text))
        .await
        .unwrap_or_else(|join_err| Err(LabelModelError::Inference(join_err.to_string())))
        .map_err(|err| {
            error!(%err, "prediction failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::failed(format!("Prediction failed: {err}")),
            )
        })?;
    info!(%prediction, "tweet classified");

    Ok(Json(PredictResponse {
        prediction,
        original_tweet: Some(tweet.into_inner()),
        success: Some(true),
    }))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
