//! Runtime bridge between UI command queue and the classification controller.

use std::thread;

use client_core::{ClassificationController, ClassifierClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    view::ChannelView,
};

/// Spawns the backend worker. Commands are handled one at a time, so a
/// second classify queued while one is in flight waits for the first.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    server_url: String,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_worker(cmd_rx, ui_tx, &server_url))
}

fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: &str) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::startup(format!(
                "backend worker startup failure: failed to build runtime: {err}"
            ))));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let client = match ClassifierClient::new(server_url) {
        Ok(client) => client,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::startup(format!(
                "backend worker startup failure: {err}"
            ))));
            tracing::error!(server_url, "invalid classification backend url: {err}");
            return;
        }
    };

    let _ = ui_tx.try_send(UiEvent::Info(format!(
        "Using classification backend at {}",
        client.server_url()
    )));
    tracing::info!(server_url = client.server_url(), "backend worker started");

    let mut controller = ClassificationController::new(client, ChannelView::new(ui_tx.clone()));
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Classify { text } => {
                runtime.block_on(controller.submit(&text));
            }
            BackendCommand::CheckHealth => {
                let event = match runtime.block_on(controller.backend().health()) {
                    Ok(health) => UiEvent::Info(format!(
                        "Backend {}; model {}",
                        health.status,
                        if health.model_status.is_loaded() {
                            "loaded"
                        } else {
                            "not loaded"
                        }
                    )),
                    Err(err) => {
                        tracing::warn!(%err, "health check failed");
                        UiEvent::Info(format!("Backend unavailable: {}", err.user_message()))
                    }
                };
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
        }
    }
    tracing::info!("backend worker stopped");
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, time::Duration};

    use client_core::BACKEND_UNREACHABLE;
    use crossbeam_channel::bounded;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn unused_local_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        format!("http://{addr}")
    }

    fn collect_attempt(ui_rx: &Receiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        loop {
            let event = ui_rx
                .recv_timeout(Duration::from_secs(10))
                .expect("worker event");
            let done = event == UiEvent::Busy(false);
            events.push(event);
            if done {
                return events;
            }
        }
    }

    #[test]
    fn unreachable_backend_surfaces_connection_message() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(64);
        let worker = launch(cmd_rx, ui_tx, unused_local_url());

        assert!(matches!(
            ui_rx.recv_timeout(Duration::from_secs(5)).expect("info"),
            UiEvent::Info(_)
        ));
        cmd_tx
            .send(BackendCommand::Classify {
                text: "Signal No. 3 raised".into(),
            })
            .expect("send");

        let events = collect_attempt(&ui_rx);
        assert_eq!(events.first(), Some(&UiEvent::Cleared));
        assert_eq!(events.get(1), Some(&UiEvent::Busy(true)));
        let error = events
            .iter()
            .find_map(|event| match event {
                UiEvent::Error(error) => Some(error.clone()),
                _ => None,
            })
            .expect("error event");
        assert_eq!(error.category(), UiErrorCategory::Transport);
        assert_eq!(error.message(), BACKEND_UNREACHABLE);

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }

    #[test]
    fn blank_submission_never_turns_busy() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(64);
        let worker = launch(cmd_rx, ui_tx, unused_local_url());
        cmd_tx
            .send(BackendCommand::Classify { text: "   ".into() })
            .expect("send");
        drop(cmd_tx);
        worker.join().expect("worker exits");

        let events: Vec<_> = ui_rx.try_iter().collect();
        assert!(!events.contains(&UiEvent::Busy(true)));
        assert!(events.iter().any(|event| matches!(
            event,
            UiEvent::Error(error) if error.category() == UiErrorCategory::Validation
        )));
    }

    #[test]
    fn invalid_server_url_is_a_startup_error() {
        let (_cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(64);
        launch(cmd_rx, ui_tx, "not a url".into())
            .join()
            .expect("worker exits");

        match ui_rx.try_recv().expect("startup event") {
            UiEvent::Error(error) => {
                assert_eq!(error.category(), UiErrorCategory::BackendStartup)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
