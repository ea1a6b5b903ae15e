//! Form controller: validates input, issues one prediction request, and drives
//! the view through busy, result, and error states.

use shared::{domain::InputText, error::ValidationError, render::ResultCard};
use tracing::{error, info, warn};

use crate::{ClassifierBackend, ClassifyError};

/// UI collaborators the controller writes to.
pub trait FormView {
    /// Hides the previous result and error.
    fn clear(&mut self);
    /// Disables the submit control and shows the busy indicator, or the reverse.
    fn set_busy(&mut self, busy: bool);
    fn show_result(&mut self, card: &ResultCard);
    fn show_error(&mut self, kind: FailureKind, message: &str);
}

/// Which step of a submit failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Server,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rendered(ResultCard),
    Rejected(ValidationError),
    ServerError(String),
    TransportError(String),
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Resets the busy state when dropped, so the control comes back even when
/// the request future is abandoned.
struct BusyGuard<'a, V: FormView> {
    view: &'a mut V,
}

impl<'a, V: FormView> BusyGuard<'a, V> {
    fn engage(view: &'a mut V) -> Self {
        view.set_busy(true);
        Self { view }
    }
}

impl<V: FormView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
    }
}

pub struct ClassificationController<B, V> {
    backend: B,
    view: V,
}

impl<B: ClassifierBackend, V: FormView> ClassificationController<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self { backend, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        self.view.clear();

        let input = match InputText::parse(raw) {
            Ok(input) => input,
            Err(err) => {
                self.view.show_error(FailureKind::Validation, &err.to_string());
                return SubmitOutcome::Rejected(err);
            }
        };

        let guard = BusyGuard::engage(&mut self.view);
        match self.backend.predict(&input).await {
            Ok(response) => {
                let card = ResultCard::new(&input, response.prediction);
                info!(
                    prediction = card.prediction(),
                    category = %card.category(),
                    "classification rendered"
                );
                guard.view.show_result(&card);
                SubmitOutcome::Rendered(card)
            }
            Err(err @ ClassifyError::Server { .. }) => {
                let message = err.user_message();
                warn!(%err, %message, "classification rejected by backend");
                guard.view.show_error(FailureKind::Server, &message);
                SubmitOutcome::ServerError(message)
            }
            Err(err @ ClassifyError::Transport(_)) => {
                error!(%err, "classification request failed");
                let message = err.user_message();
                guard.view.show_error(FailureKind::Transport, &message);
                SubmitOutcome::TransportError(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
