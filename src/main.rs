//! Chat widget terminal client
//!
//! Entry point: loads configuration, wires the HTTP backend and terminal
//! view into a `ChatWidget`, and runs the console loop.

use std::sync::Arc;

use anyhow::Context;
use chat_widget::api::HttpBackend;
use chat_widget::config::AppConfig;
use chat_widget::terminal::{self, TerminalView};
use chat_widget::widget::ChatWidget;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED). Logs go to stderr so the
    // transcript on stdout stays readable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Configuration error: {msg}");
            std::process::exit(1);
        }
    };

    info!(
        name: "widget.config.loaded",
        base_url = %config.backend.base_url,
        subject = %config.widget.subject_name,
        "Configuration loaded"
    );

    let backend = Arc::new(
        HttpBackend::from_config(&config.backend).context("failed to build backend client")?,
    );
    let view = Arc::new(TerminalView::stdout());
    let widget = ChatWidget::new(backend, view, config.widget);

    widget.start().await;
    let _monitor = widget.spawn_health_monitor();

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = terminal::run(&widget, stdin) => result.context("terminal input failed")?,
        _ = tokio::signal::ctrl_c() => {
            info!(name: "widget.shutdown", "Interrupted");
        }
    }

    Ok(())
}
