use std::{
    io::{self, Read, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_client_settings, ClassificationController, ClassifierClient, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{read_submission, OutputFormat, TerminalView};

#[derive(Parser, Debug)]
#[command(about = "Classify tweet informativeness with the classification backend")]
struct Args {
    /// Backend base URL; overrides client.toml and APP__SERVER_URL.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one tweet given as an argument, or read from stdin.
    Classify {
        text: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Prompt for tweets until end of input.
    Interactive {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show backend and model status.
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_client_settings().with_server_url(args.server_url);
    let client = ClassifierClient::new(&settings.server_url)?;
    tracing::debug!(server_url = client.server_url(), "using classification backend");

    match args.command {
        Command::Classify { text, format } => classify_once(client, text, format).await,
        Command::Interactive { format } => interactive(client, format).await,
        Command::Health => health(&client).await,
    }
}

async fn classify_once(
    client: ClassifierClient,
    text: Option<String>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read tweet from stdin")?;
            buf
        }
    };

    let view = TerminalView::new(io::stdout(), io::stderr(), format);
    let mut controller = ClassificationController::new(client, view);
    Ok(exit_code(&controller.submit(&text).await))
}

async fn interactive(client: ClassifierClient, format: OutputFormat) -> Result<ExitCode> {
    let view = TerminalView::new(io::stdout(), io::stderr(), format);
    let mut controller = ClassificationController::new(client, view);
    let stdin = io::stdin();
    let mut reader = stdin.lock();

    eprintln!("Enter a tweet and press Enter to classify. End a line with \\ to continue it. Ctrl-D quits.");
    loop {
        eprint!("tweet> ");
        io::stderr().flush().ok();
        let Some(submission) = read_submission(&mut reader).context("failed to read tweet")?
        else {
            break;
        };
        controller.submit(&submission).await;
    }
    Ok(ExitCode::SUCCESS)
}

async fn health(client: &ClassifierClient) -> Result<ExitCode> {
    let (info, health) = match (client.service_info().await, client.health().await) {
        (Ok(info), Ok(health)) => (info, health),
        (Err(err), _) | (_, Err(err)) => {
            tracing::error!(%err, "health check failed");
            println!("Error: {}", err.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{} ({})", info.message, info.status);
    println!("status: {}", health.status);
    println!(
        "model: {}",
        if health.model_status.is_loaded() {
            "loaded"
        } else {
            "not loaded"
        }
    );
    Ok(if health.model_status.is_loaded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    if outcome.is_rendered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ValidationError;

    #[test]
    fn only_rendered_outcomes_count_as_success() {
        assert!(!SubmitOutcome::Rejected(ValidationError::EmptyInput).is_rendered());
        assert!(!SubmitOutcome::ServerError("Tweet text is empty".into()).is_rendered());
        assert!(!SubmitOutcome::TransportError("down".into()).is_rendered());
    }

    #[test]
    fn parses_classify_with_html_format() {
        let args = Args::try_parse_from([
            "desktop",
            "--server-url",
            "http://127.0.0.1:5000",
            "classify",
            "Flood warning",
            "--format",
            "html",
        ])
        .expect("args");
        assert_eq!(args.server_url.as_deref(), Some("http://127.0.0.1:5000"));
        match args.command {
            Command::Classify { text, format } => {
                assert_eq!(text.as_deref(), Some("Flood warning"));
                assert_eq!(format, OutputFormat::Html);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
