mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::load_client_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::ClassifierApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop form for classifying tweet informativeness")]
struct Args {
    /// Backend base URL; overrides client.toml and APP__SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings = load_client_settings().with_server_url(args.server_url);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, settings.server_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Digi-Bayani Tweet Classifier")
            .with_inner_size([760.0, 620.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Digi-Bayani Tweet Classifier",
        options,
        Box::new(|_cc| Ok(Box::new(ClassifierApp::new(cmd_tx, ui_rx)))),
    )
}
