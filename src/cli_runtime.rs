use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::Commands;

#[derive(Parser)]
#[command(name = "helium")]
#[command(about = "Command-line client for the Helium case management service", long_about = None)]
pub(crate) struct Cli {
    /// Answer yes to confirmations and accept prefilled edits
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Single-threaded: session state is shared through Rc/RefCell.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(crate::cli_exec::handle_command(cli.command, cli.yes))
}
