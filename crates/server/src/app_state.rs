use std::sync::Arc;

use shared::protocol::ModelStatus;

use crate::classifier::TweetClassifier;

#[derive(Clone)]
pub(crate) struct AppState {
    /// `None` when the configured model could not be loaded.
    pub(crate) classifier: Option<Arc<TweetClassifier>>,
}

impl AppState {
    pub(crate) fn model_status(&self) -> ModelStatus {
        if self.classifier.is_some() {
            ModelStatus::Loaded
        } else {
            ModelStatus::NotLoaded
        }
    }
}
