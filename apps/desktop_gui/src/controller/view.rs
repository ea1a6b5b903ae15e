//! Form view that forwards controller updates to the UI thread.

use client_core::{FailureKind, FormView};
use crossbeam_channel::Sender;
use shared::render::ResultCard;

use crate::controller::events::{UiError, UiEvent};

pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn emit(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            tracing::debug!("ui event receiver dropped");
        }
    }
}

impl FormView for ChannelView {
    fn clear(&mut self) {
        self.emit(UiEvent::Cleared);
    }

    fn set_busy(&mut self, busy: bool) {
        self.emit(UiEvent::Busy(busy));
    }

    fn show_result(&mut self, card: &ResultCard) {
        self.emit(UiEvent::Rendered(card.clone()));
    }

    fn show_error(&mut self, kind: FailureKind, message: &str) {
        self.emit(UiEvent::Error(UiError::new(kind.into(), message)));
    }
}
