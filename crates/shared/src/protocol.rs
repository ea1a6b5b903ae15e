use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::InputText;

pub const INFO_ROUTE: &str = "/";
pub const PREDICT_ROUTE: &str = "/predict";
pub const HEALTH_ROUTE: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub tweet: String,
}

impl From<&InputText> for PredictRequest {
    fn from(value: &InputText) -> Self {
        Self {
            tweet: value.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_tweet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelStatus {
    #[serde(rename = "loaded")]
    Loaded,
    #[serde(rename = "not loaded")]
    NotLoaded,
}

impl ModelStatus {
    pub fn is_loaded(self) -> bool {
        self == Self::Loaded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_status: ModelStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}
