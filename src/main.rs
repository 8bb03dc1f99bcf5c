//! Fantasy stock league CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use league_config::load_config;
use league_core::error::LeagueError;
use league_monitor::setup_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Missing config files fall back to defaults; validate-config reports them
    let config = load_config(&cli.config, false);

    // Setup logging
    let (level, json, file) = match &config {
        Ok(c) => (
            cli.log_level
                .map(|l| l.as_str().to_string())
                .unwrap_or_else(|| c.logging.level.clone()),
            cli.json_logs || c.logging.format == "json",
            c.logging.file.as_ref().map(PathBuf::from),
        ),
        Err(_) => (
            cli.log_level.map_or("info", |l| l.as_str()).to_string(),
            cli.json_logs,
            None,
        ),
    };
    let guard = setup_logging(&level, json, file.as_deref()).context("Failed to set up logging")?;

    // Execute command
    let result = match (config, cli.command) {
        (_, Commands::ValidateConfig) => cli::commands::validate::run(&cli.config).await,
        (Ok(config), command) => cli::commands::dispatch(command, &config).await,
        (Err(e), _) => Err(e.into()),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<LeagueError>() {
                Some(err) => {
                    eprintln!("{}", err.user_message());
                    if err.requires_login() {
                        eprintln!("Run `league login` to start a new session.");
                    }
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    };

    drop(guard);
    Ok(code)
}
