//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `wheregoes` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use wheregoes::app::run_trace_command;
use wheregoes::config::{Cli, Command, EXIT_HARD_FAILURE};
use wheregoes::initialization::{init_crypto_provider, init_logger_with};
use wheregoes::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    // PORT, SERVING_HOST and GET_TOKEN may come from a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    match &cli.command {
        Command::Trace(args) => {
            let code = run_trace_command(&config, args).await;
            process::exit(code);
        }
        Command::Serve(_) => {
            // Nothing cancels this token; the process runs until it is killed
            if let Err(e) = start_server(config, CancellationToken::new()).await {
                eprintln!("wheregoes error: {:#}", e);
                process::exit(EXIT_HARD_FAILURE);
            }
            Ok(())
        }
    }
}
