mod args;
mod cli;
mod error;
mod presets;
mod save;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use log::error;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr, so that the printed pattern stays clean.
    // Use `RUST_LOG=debug` for the progress of the simulation.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = Args::parse().and_then(cli::run);
    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
