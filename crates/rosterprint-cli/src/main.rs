//! rosterprint - athlete registration and print sheets for school sports events.
//!
//! Reads and writes the roster in a spreadsheet-backed store and renders
//! A4 photo boards and name lists, one set per sport / age / gender.

mod cli;
mod commands;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: u8) {
    // RUST_LOG wins; otherwise -v / -vv raise the default level
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "rosterprint starting");

    commands::run(cli).await
}
