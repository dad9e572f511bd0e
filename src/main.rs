//! Arena host (default binary).
//!
//! Runs one room: client lines on stdin, snapshots on stdout, logs on stderr.
//! Configure with the `ARENA_*` variables documented in [`tetris_arena::host`]
//! and `RUST_LOG` for log verbosity.

use anyhow::Result;
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::EnvFilter;

use tetris_arena::host::{run_room, HostConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = HostConfig::from_env();
    tracing::info!(?config, "starting arena host");

    run_room(config, BufReader::new(stdin()), stdout()).await
}
