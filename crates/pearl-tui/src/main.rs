use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pearl_core::{Config, GenerationBackend, OllamaClient};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod handler;
mod tui;
mod ui;
mod view;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "pearl")]
#[command(about = "Terminal chat with PEARL, a local AI medical assistant served by Ollama")]
struct Cli {
    /// Config file (defaults to <config dir>/pearl/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging()?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    info!(base_url = %config.base_url, model = %config.model, "starting pearl");

    let client = match config.request_timeout() {
        Some(timeout) => OllamaClient::with_timeout(&config.base_url, timeout)?,
        None => OllamaClient::new(&config.base_url),
    };
    spawn_backend_check(client.clone(), config.model.clone());

    let events = EventHandler::new();
    let backend: Arc<dyn GenerationBackend> = Arc::new(client);
    let mut app = App::new(&config, backend, events.sender());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, events).await;
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, mut events: EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

/// Warn in the log when the backend is unreachable or lacks the model. Never fatal.
fn spawn_backend_check(client: OllamaClient, model: String) {
    tokio::spawn(async move {
        match client.has_model(&model).await {
            Ok(true) => info!(%model, "model available"),
            Ok(false) => warn!(%model, "model not installed; pull it with `ollama pull {model}`"),
            Err(err) => warn!(error = %err, base_url = client.base_url(), "generation backend unreachable"),
        }
    });
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pearl");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("pearl-tui.log"))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    // RUST_LOG overrides the default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pearl_core=info,pearl_tui=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_ansi(false),
        )
        .with(env_filter)
        .init();

    Ok(guard)
}
