use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::InputText,
    error::ErrorBody,
    protocol::{
        HealthResponse, PredictRequest, PredictResponse, ServiceInfo, HEALTH_ROUTE, INFO_ROUTE,
        PREDICT_ROUTE,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod config;
mod controller;

pub use controller::{ClassificationController, FailureKind, FormView, SubmitOutcome};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const GENERIC_SERVER_ERROR: &str = "An error occurred during classification.";
pub const BACKEND_UNREACHABLE: &str =
    "Failed to connect to the server. Make sure the classification backend is running on port 5000.";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classification backend returned {status}")]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("classification backend unreachable: {0}")]
    Transport(String),
}

impl ClassifyError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message
                .as_deref()
                .filter(|message| !message.is_empty())
                .unwrap_or(GENERIC_SERVER_ERROR)
                .to_string(),
            Self::Transport(_) => BACKEND_UNREACHABLE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid server url '{url}': {source}")]
pub struct InvalidServerUrl {
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

/// Anything that can turn input text into a backend label.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    async fn predict(&self, input: &InputText) -> Result<PredictResponse, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    server_url: String,
}

impl ClassifierClient {
    pub fn new(server_url: &str) -> Result<Self, InvalidServerUrl> {
        let trimmed = server_url.trim();
        Url::parse(trimmed).map_err(|source| InvalidServerUrl {
            url: trimmed.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            server_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, route: &str) -> String {
        if route == INFO_ROUTE {
            format!("{}/", self.server_url)
        } else {
            format!("{}{route}", self.server_url)
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, ClassifyError> {
        self.get_json(HEALTH_ROUTE).await
    }

    pub async fn service_info(&self) -> Result<ServiceInfo, ClassifyError> {
        self.get_json(INFO_ROUTE).await
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, ClassifyError> {
        let response = self
            .http
            .get(self.endpoint(route))
            .send()
            .await
            .map_err(|err| ClassifyError::Transport(err.to_string()))?;
        decode_response(response).await
    }
}

#[async_trait]
impl ClassifierBackend for ClassifierClient {
    async fn predict(&self, input: &InputText) -> Result<PredictResponse, ClassifyError> {
        let url = self.endpoint(PREDICT_ROUTE);
        debug!(%url, chars = input.as_str().chars().count(), "posting classification request");
        let response = self
            .http
            .post(url)
            .json(&PredictRequest::from(input))
            .send()
            .await
            .map_err(|err| ClassifyError::Transport(err.to_string()))?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClassifyError> {
    let status = response.status();
    if !status.is_success() {
        // Only a JSON error body counts as a server answer; anything else is
        // a malformed response.
        let body = response.bytes().await.map_err(|err| {
            ClassifyError::Transport(format!("failed to read {status} response: {err}"))
        })?;
        let body = serde_json::from_slice::<serde_json::Value>(&body).map_err(|err| {
            ClassifyError::Transport(format!("non-JSON {status} response: {err}"))
        })?;
        let message = serde_json::from_value::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error);
        return Err(ClassifyError::Server { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ClassifyError::Transport(format!("invalid response payload: {err}")))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
