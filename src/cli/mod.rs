//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "league")]
#[command(author, version, about = "Fantasy stock league client")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "LEAGUE_CONFIG")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the configuration)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),
    /// Create an account and log in
    Signup(SignupArgs),
    /// Log out and clear cached data
    Logout,
    /// Change your username
    Rename(RenameArgs),
    /// Browse the stock listing
    Stocks(StocksArgs),
    /// Balance and owned shares of one stock in the active league
    Info(TickerArgs),
    /// Buy shares in the active league
    Buy(TradeArgs),
    /// Sell shares in the active league
    Sell(TradeArgs),
    /// Show your holdings in the active league
    Portfolio(PortfolioArgs),
    /// Manage leagues
    #[command(subcommand)]
    Leagues(LeagueCommands),
    /// League leaderboard
    Leaderboard,
    /// Your weekly schedule
    Schedule,
    /// This week's head-to-head matchup
    Matchup,
    /// Live dashboard of the active league
    Dashboard(DashboardArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(short, long, env = "LEAGUE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(clap::Args)]
pub struct SignupArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(short, long, env = "LEAGUE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password again
    #[arg(long)]
    pub confirm: String,
}

#[derive(clap::Args)]
pub struct RenameArgs {
    /// New username
    pub username: String,
}

#[derive(clap::Args)]
pub struct StocksArgs {
    /// Filter by ticker or company name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page to show
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Only show the popular row
    #[arg(long)]
    pub popular: bool,
}

#[derive(clap::Args)]
pub struct TickerArgs {
    /// Stock ticker
    pub ticker: String,
}

#[derive(clap::Args)]
pub struct TradeArgs {
    /// Stock ticker
    pub ticker: String,

    /// Number of shares
    pub shares: String,
}

#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Page to show
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

#[derive(Subcommand)]
pub enum LeagueCommands {
    /// List leagues visible to you
    List,
    /// Create a league
    Create {
        /// League name
        name: String,
    },
    /// Join a league by id
    Join {
        /// League id
        league_id: String,
    },
    /// Make a league the active one
    Select {
        /// League id
        league_id: String,
    },
    /// Set the first Monday of play
    SetStartDate {
        /// League id
        league_id: String,
        /// Start date (YYYY-MM-DD)
        date: String,
    },
    /// Delete a league
    Delete {
        /// League id
        league_id: String,
    },
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Redraw interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub refresh_ms: u64,
}
