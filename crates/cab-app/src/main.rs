use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cab_config::Config;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod profile;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Language helper backend: one JSON request per stdin line, one reply per
/// stdout line
#[derive(Parser, Debug)]
#[command(name = "cab")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON store file, overrides CAB_STORE_PATH and the platform data dir
    #[arg(long, value_name = "PATH", conflicts_with = "memory")]
    store: Option<PathBuf>,

    /// Keep everything in memory, nothing survives a restart
    #[arg(long)]
    memory: bool,

    /// Emit logs as JSON (default when stderr is not a terminal)
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(args));

    // A read on stdin can stay parked on a blocking thread after shutdown
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = json || !atty::is(atty::Stream::Stderr);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new();
    let store = profile::open_store(args.memory, args.store, &config)?;

    let state = Arc::new(AppState::new(config, store)?);
    state.local.ensure_default_options()?;

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();
    tracing::info!("Ready, reading requests from stdin");

    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("failed to listen for ctrl+c: {e}");
                }
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            joined = tasks.join_next() => match joined {
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("task failed: {e:#}");
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    controller.shutdown();
                }
                None => break,
            }
        }
    }

    tracing::info!("All tasks stopped");
    Ok(())
}
