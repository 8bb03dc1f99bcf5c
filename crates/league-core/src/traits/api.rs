//! League API trait definition.

use crate::error::ApiError;
use crate::types::{
    Credentials, Holdings, Leaderboard, League, LeagueId, LeagueListing, Matchup, Schedule, Side,
    Stock, StockInfo, TokenPair, TradeReceipt, TradeRequest,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for the remote fantasy stock league API.
///
/// Methods taking `token` send it as a bearer token; a rejected token surfaces as
/// [`ApiError::Unauthorized`].
#[async_trait]
pub trait LeagueApi: Send + Sync {
    /// Exchange credentials for an access/refresh token pair.
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    /// Create an account.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// Rename the current user.
    ///
    /// # Returns
    /// The username the server stored
    async fn update_username(&self, token: &str, username: &str) -> Result<String, ApiError>;

    /// List every stock with its start and current price.
    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError>;

    /// Balance and owned shares of one stock in a league.
    async fn stock_info(
        &self,
        token: &str,
        league: &LeagueId,
        ticker: &str,
    ) -> Result<StockInfo, ApiError>;

    /// Execute a buy or sell.
    async fn trade(
        &self,
        token: &str,
        side: Side,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, ApiError>;

    /// Buy shares.
    async fn buy(&self, token: &str, request: &TradeRequest) -> Result<TradeReceipt, ApiError> {
        self.trade(token, Side::Buy, request).await
    }

    /// Sell shares.
    async fn sell(&self, token: &str, request: &TradeRequest) -> Result<TradeReceipt, ApiError> {
        self.trade(token, Side::Sell, request).await
    }

    /// Portfolio, balance and net worth in a league.
    async fn owned_stocks(&self, token: &str, league: &LeagueId) -> Result<Holdings, ApiError>;

    /// Leagues visible to the user.
    async fn list_leagues(&self, token: &str) -> Result<LeagueListing, ApiError>;

    /// Create a league; the creator becomes its admin.
    async fn create_league(&self, token: &str, name: &str) -> Result<League, ApiError>;

    /// Join a league by id.
    async fn join_league(&self, token: &str, league: &LeagueId) -> Result<League, ApiError>;

    /// Set the start date of a full league.
    async fn set_start_date(
        &self,
        token: &str,
        league: &LeagueId,
        start_date: NaiveDate,
    ) -> Result<League, ApiError>;

    /// Delete a league (league admin or superuser only).
    async fn delete_league(&self, token: &str, league: &LeagueId) -> Result<(), ApiError>;

    /// Ranked net worth of every participant.
    async fn leaderboard(&self, token: &str, league: &LeagueId) -> Result<Leaderboard, ApiError>;

    /// Weekly matchups of the current user.
    async fn schedule(&self, token: &str, league: &LeagueId) -> Result<Schedule, ApiError>;

    /// Current week head-to-head.
    async fn matchup(&self, token: &str, league: &LeagueId) -> Result<Matchup, ApiError>;

    /// API name for diagnostics.
    fn name(&self) -> &str;
}
