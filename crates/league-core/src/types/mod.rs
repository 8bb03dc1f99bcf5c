//! Core data types for the league client.

mod league;
mod portfolio;
mod session;
mod standings;
mod stock;
mod trade;

pub mod de;

pub use league::{
    next_monday_on_or_after, parse_start_date, validate_start_date, League, LeagueId,
    LeagueListing, LeagueMembership, Selectability, LEAGUE_SIZE,
};
pub use portfolio::{Holding, Holdings, STARTING_BALANCE};
pub use session::{Credentials, Session, TokenPair};
pub use standings::{
    Leaderboard, LeaderboardEntry, Matchup, Schedule, ScheduledMatchup, TeamStock, TeamSummary,
};
pub use stock::{Stock, StockInfo, StockSnapshot};
pub use trade::{Side, TradeReceipt, TradeRequest};
