use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uci_engine::{EngineConfig, UciSession};

#[derive(Parser, Debug)]
#[command(author, version, about = "UCI chess engine backed by a fixed-depth classical search", long_about = None)]
struct Args {
    /// Search depth in plies (1-6)
    #[arg(long)]
    depth: Option<u8>,

    /// Path to a TOML config file (overrides CHESS_ENGINE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(fallback: &str) {
    // Logs go to stderr; stdout carries the protocol
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = EngineConfig::load(args.config.as_deref(), args.depth)
        .context("failed to load engine configuration")?;
    init_tracing(&config.log_filter);

    info!(
        depth = config.depth,
        pruning = config.pruning,
        "uci_engine v{} ready",
        env!("CARGO_PKG_VERSION")
    );

    let mut session = UciSession::new(&config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        for out in session.handle_line(&line) {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;
        if session.is_quit() {
            break;
        }
    }
    Ok(())
}
