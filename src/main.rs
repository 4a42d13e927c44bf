// Match console entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the match backend (remote service or local engine)
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI event loop
// 7. Cleanup on exit

use chessrpg_console::app;
use chessrpg_console::backend::MatchBackend;
use chessrpg_console::config;
use chessrpg_console::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Match console starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} pieces, {} point pool, duel {} vs {}",
        config.loadout.pieces.len(),
        config.loadout.points_pool,
        config.duel.a,
        config.duel.b
    );

    // 3. Build the match backend
    let backend = MatchBackend::from_config(&config);
    let backend_label = backend.describe();
    info!("Match backend: {backend_label}");

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (backend_tx, backend_rx) = mpsc::channel(256);

    // 5. Spawn app logic task
    let view_state = tui::ViewState::new(&config, backend_label);
    let app_state = app::AppState::new(config, backend, backend_tx);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, backend_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until the user quits)
    info!("Console ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Match console shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("chessrpg.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chessrpg_console=info,warn")),
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
