// Draft room client entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the HTTP backend client
// 4. Create mpsc channels
// 5. Spawn the controller task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use kbr_core::api::HttpBackend;
use kbr_core::config;
use kbr_tui::app;
use kbr_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Draft room client starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, default league '{}' with {} teams",
        config.api.base_url, config.setup.league_name, config.setup.teams
    );

    // 3. Backend client
    let backend = HttpBackend::from_config(&config.api).context("failed to build HTTP client")?;
    let export_dir = config.export.resolved_dir();
    info!("CSV exports go to {}", export_dir.display());

    // 4. Channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Controller task
    let app_state = app::AppState::new(Arc::new(backend), export_dir);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Controller loop error: {}", e);
        }
    });

    // 6. TUI: consumes ui_rx and sends commands through cmd_tx until the
    // user quits.
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.setup.clone()).await {
        error!("TUI error: {}", e);
    }

    // 7. Give the controller a moment to finish an in-flight request
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Draft room client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("kbr-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kbr_tui=info,kbr_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
