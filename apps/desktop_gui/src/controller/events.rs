//! Backend-to-UI events and error modeling for the desktop form.

use client_core::FailureKind;
use shared::render::ResultCard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    Cleared,
    Busy(bool),
    Rendered(ResultCard),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Server,
    Transport,
    BackendStartup,
}

impl From<FailureKind> for UiErrorCategory {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Validation => Self::Validation,
            FailureKind::Server => Self::Server,
            FailureKind::Transport => Self::Transport,
        }
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Input",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::BackendStartup => "Startup",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn new(category: UiErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn startup(message: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::BackendStartup, message)
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
