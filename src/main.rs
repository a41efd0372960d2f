//! regrminer - Regression-chain dataset mining CLI

use anyhow::Result;
use clap::Parser;
use regrminer::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI args first so --log-level can seed the filter;
    // RUST_LOG still wins when set
    let cli = cli::Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    cli::run(cli)
}
