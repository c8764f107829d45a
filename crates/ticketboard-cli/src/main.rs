mod cli;
mod handlers;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use cli::{Cli, Commands};
use ticketboard_board::{run_saver, BoardController, SampleApi};
use ticketboard_core::AppConfig;
use ticketboard_persistence::{default_state_path, JsonStateStore, StateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TICKETBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    let config = AppConfig::load();

    let state_path = cli
        .file
        .map(PathBuf::from)
        .or_else(|| config.state_path.clone())
        .unwrap_or_else(default_state_path);
    let state_store = Arc::new(JsonStateStore::new(&state_path));

    let api = Arc::new(SampleApi::with_latency(Duration::from_millis(
        config.effective_fetch_latency_ms(),
    )));

    let (mut controller, save_rx) = BoardController::new(api, true);
    let save_rx = save_rx.ok_or_else(|| anyhow::anyhow!("save channel missing"))?;
    let saver = tokio::spawn(run_saver(
        save_rx,
        state_store.clone() as Arc<dyn StateStore>,
    ));

    controller.hydrate(state_store.as_ref()).await;

    match cli.command {
        Commands::Show(args) => handlers::show(&mut controller, args).await,
        Commands::Move(args) => handlers::move_ticket(&mut controller, args),
        Commands::SetPriority(args) => handlers::set_priority(&mut controller, args),
        Commands::Tags => handlers::tags(),
        Commands::Reset => handlers::reset(&mut controller),
    }

    // Dropping the controller closes the save channel; wait for the saver
    // to flush the queued snapshots before exiting.
    drop(controller);
    saver.await?;

    Ok(())
}
