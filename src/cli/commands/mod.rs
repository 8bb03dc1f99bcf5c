//! CLI command implementations.

pub mod account;
pub mod dashboard;
pub mod leagues;
pub mod portfolio;
pub mod standings;
pub mod stocks;
pub mod validate;

use anyhow::{Context, Result};
use league_app::AppContext;
use league_config::AppConfig;
use std::time::Duration;

use crate::cli::Commands;

/// Run every command that needs a client context.
pub async fn dispatch(command: Commands, config: &AppConfig) -> Result<()> {
    let ctx = AppContext::init(config).context("Failed to start the client")?;
    match command {
        Commands::Login(args) => account::login(&ctx, args).await,
        Commands::Signup(args) => account::signup(&ctx, args).await,
        Commands::Logout => account::logout(&ctx),
        Commands::Rename(args) => account::rename(&ctx, args).await,
        Commands::Stocks(args) => stocks::list(&ctx, args).await,
        Commands::Info(args) => stocks::info(&ctx, args).await,
        Commands::Buy(args) => stocks::buy(&ctx, args).await,
        Commands::Sell(args) => stocks::sell(&ctx, args).await,
        Commands::Portfolio(args) => portfolio::run(&ctx, args).await,
        Commands::Leagues(command) => leagues::run(&ctx, command).await,
        Commands::Leaderboard => standings::leaderboard(&ctx).await,
        Commands::Schedule => standings::schedule(&ctx).await,
        Commands::Matchup => standings::matchup(&ctx).await,
        Commands::Dashboard(args) => dashboard::run(&ctx, args),
        // Runs without a context, see main
        Commands::ValidateConfig => Ok(()),
    }
}

/// `4m 12s` style rendering of cache ages.
pub(crate) fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
