//! Classification form: tweet input, submit control, result card and error panel.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;
use shared::render::ResultCard;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{err_label, UiError, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::FormState,
};
use crate::ui::theme::{category_color, ERROR_FILL, ERROR_TEXT};

const INPUT_ID: &str = "tweet_input";

pub struct ClassifierApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: FormState,
}

impl ClassifierApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut state = FormState::default();
        dispatch_backend_command(&cmd_tx, BackendCommand::CheckHealth, &mut state.status);
        Self {
            cmd_tx,
            ui_rx,
            state,
        }
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(event) => self.state.apply(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state.busy || self.state.pending {
                        self.state.busy = false;
                        self.state.pending = false;
                        self.state.error = Some(UiError::startup(
                            "Backend worker stopped unexpectedly; restart the app",
                        ));
                    }
                    break;
                }
            }
        }
    }

    /// Hands the current input to the worker unless an attempt is already
    /// in flight. Returns whether a classify command was queued.
    fn queue_submission(&mut self) -> bool {
        if !self.state.submit_enabled() {
            return false;
        }
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Classify {
                text: self.state.input.clone(),
            },
            &mut self.state.status,
        );
        self.state.pending = queued;
        queued
    }

    fn input_panel(&mut self, ui: &mut egui::Ui) {
        let input_id = egui::Id::new(INPUT_ID);
        let enter_submits = enter_submits(ui.ctx(), input_id);

        ui.label("Enter a tweet about typhoons or floods:");
        ui.add(
            egui::TextEdit::multiline(&mut self.state.input)
                .id(input_id)
                .hint_text("e.g. Signal No. 3 raised over Metro Manila, classes suspended")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        let mut clicked = false;
        ui.horizontal(|ui| {
            let label = if self.state.busy {
                "Classifying..."
            } else {
                "Classify Tweet"
            };
            clicked = ui
                .add_enabled(self.state.submit_enabled(), egui::Button::new(label))
                .clicked();
            if self.state.busy || self.state.pending {
                ui.add(egui::Spinner::new());
            }
            if ui.button("Check backend").clicked() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::CheckHealth,
                    &mut self.state.status,
                );
            }
        });

        if clicked || enter_submits {
            self.queue_submission();
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(&self.state.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Tweet Informativeness Classifier");
            ui.label("Disaster tweet triage for typhoon and flood reports");
            ui.separator();

            self.input_panel(ui);
            ui.add_space(12.0);

            if let Some(card) = &self.state.result {
                Self::result_panel(ui, card);
            }
            if let Some(error) = &self.state.error {
                Self::error_panel(ui, error);
            }
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn result_panel(ui: &mut egui::Ui, card: &ResultCard) {
        let color = category_color(card.category());
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.strong("Original Tweet:");
                ui.label(card.original_tweet());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.strong("Informativeness Level:");
                    ui.label(
                        egui::RichText::new(card.prediction())
                            .color(color)
                            .strong()
                            .size(18.0),
                    );
                });
                ui.label(format!(
                    "{} {}",
                    card.category().icon(),
                    card.category().description()
                ));
            });
    }

    fn error_panel(ui: &mut egui::Ui, error: &UiError) {
        egui::Frame::new()
            .fill(ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, ERROR_TEXT))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(
                    ERROR_TEXT,
                    format!("{}: {}", err_label(error.category()), error.message()),
                );
            });
    }
}

/// Plain Enter in the focused input submits and is consumed so the editor
/// never sees it; Shift+Enter falls through to the editor as a newline.
fn enter_submits(ctx: &egui::Context, input_id: egui::Id) -> bool {
    let has_focus = ctx.memory(|mem| mem.has_focus(input_id));
    let submits = has_focus
        && ctx.input(|input| input.key_pressed(egui::Key::Enter) && !input.modifiers.shift);
    if submits {
        ctx.input_mut(|input| input.consume_key(egui::Modifiers::NONE, egui::Key::Enter));
    }
    submits
}

impl eframe::App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::InputText;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn enter_press(modifiers: egui::Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    /// Renders one frame with the input focused, then a frame carrying an
    /// Enter press with `modifiers`.
    fn press_enter_in_input(app: &mut ClassifierApp, modifiers: egui::Modifiers) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            ctx.memory_mut(|mem| mem.request_focus(egui::Id::new(INPUT_ID)));
            app.show(ctx);
        });
        let _ = ctx.run(enter_press(modifiers), |ctx| app.show(ctx));
    }

    fn queued_classifies(cmd_rx: &Receiver<BackendCommand>) -> usize {
        cmd_rx
            .try_iter()
            .filter(|cmd| matches!(cmd, BackendCommand::Classify { .. }))
            .count()
    }

    fn app() -> (ClassifierApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(64);
        let app = ClassifierApp::new(cmd_tx, ui_rx);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::CheckHealth));
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn one_classify_in_flight_at_a_time() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.state.input = "Flood waters rising in Marikina".into();

        assert!(app.queue_submission());
        assert!(!app.queue_submission());
        assert_eq!(cmd_rx.try_iter().count(), 1);

        for event in [
            UiEvent::Cleared,
            UiEvent::Busy(true),
            UiEvent::Rendered(ResultCard::new(
                &InputText::parse("Flood waters rising in Marikina").expect("valid"),
                "High",
            )),
            UiEvent::Busy(false),
        ] {
            ui_tx.send(event).expect("send");
        }
        app.process_ui_events();

        assert!(app.state.submit_enabled());
        assert!(app.queue_submission());
    }

    #[test]
    fn plain_enter_in_focused_input_queues_one_classify() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.state.input = "Signal No. 3 raised over Metro Manila".into();

        press_enter_in_input(&mut app, egui::Modifiers::NONE);

        assert_eq!(queued_classifies(&cmd_rx), 1);
        assert!(app.state.pending);
        assert!(!app.state.submit_enabled());
    }

    #[test]
    fn shift_enter_never_submits() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.state.input = "Signal No. 3 raised".into();

        press_enter_in_input(&mut app, egui::Modifiers::SHIFT);

        assert_eq!(queued_classifies(&cmd_rx), 0);
        assert!(app.state.submit_enabled());
    }

    #[test]
    fn enter_without_focus_never_submits() {
        let ctx = egui::Context::default();
        let mut submitted = true;
        let _ = ctx.run(enter_press(egui::Modifiers::NONE), |ctx| {
            submitted = enter_submits(ctx, egui::Id::new(INPUT_ID));
        });
        assert!(!submitted);
    }

    #[test]
    fn worker_exit_mid_attempt_reenables_submit() {
        let (mut app, _cmd_rx, ui_tx) = app();
        app.state.input = "baha".into();
        assert!(app.queue_submission());
        ui_tx.send(UiEvent::Busy(true)).expect("send");
        drop(ui_tx);

        app.process_ui_events();

        assert!(app.state.submit_enabled());
        assert_eq!(
            app.state.error.as_ref().map(UiError::category),
            Some(UiErrorCategory::BackendStartup)
        );
    }

    #[test]
    fn disconnected_queue_leaves_submit_enabled() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(8);
        drop(cmd_rx);
        let mut app = ClassifierApp::new(cmd_tx, ui_rx);

        assert!(!app.queue_submission());
        assert!(app.state.submit_enabled());
        assert!(app.state.status.contains("disconnected"));
    }
}
