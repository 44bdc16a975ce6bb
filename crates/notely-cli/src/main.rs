//! Notely CLI - browse, search, and edit notes from the command line
//!
//! Talks to the Notely notes service; pins are kept on this machine.

mod cli;
mod commands;
mod config;
mod error;


use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::open_board;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::run_board_command;
use crate::config::{CliConfig, Overrides};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = Overrides::from_env(cli.api_url);
    match cli.command {
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        Commands::Config { command } => run_config(command, &overrides, &mut io::stdout()),
        command => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            let settings = config.resolve(&overrides)?;
            let mut board = open_board(&settings)?;
            run_board_command(command, &mut board, &mut io::stdout()).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "notely=debug" } else { "notely=warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}
