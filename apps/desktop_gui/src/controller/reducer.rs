//! Form state and the transitions UI events drive.

use shared::render::ResultCard;

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Default)]
pub struct FormState {
    pub input: String,
    pub busy: bool,
    /// A submit was queued but the backend has not answered yet.
    pub pending: bool,
    pub result: Option<ResultCard>,
    pub error: Option<UiError>,
    pub status: String,
}

impl FormState {
    pub fn submit_enabled(&self) -> bool {
        !self.busy && !self.pending
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Cleared => {
                self.result = None;
                self.error = None;
            }
            UiEvent::Busy(busy) => {
                self.busy = busy;
                self.pending = false;
            }
            UiEvent::Rendered(card) => {
                self.pending = false;
                self.error = None;
                self.result = Some(card);
            }
            UiEvent::Error(error) => {
                self.pending = false;
                self.error = Some(error);
            }
        }
    }
}
