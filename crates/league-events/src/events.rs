//! Event payloads.

use league_core::types::LeagueId;
use serde::{Deserialize, Serialize};

/// A payload that can travel over an [`EventBus`](crate::EventBus).
pub trait Event: Send + Sync + 'static {
    /// Topic name used in logs.
    fn topic(&self) -> &'static str;
}

/// Holdings in `league_id` changed; its owned-stocks cache is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StocksUpdated {
    pub league_id: LeagueId,
}

impl StocksUpdated {
    pub fn new(league_id: LeagueId) -> Self {
        Self { league_id }
    }

    /// Whether the event concerns `league`.
    pub fn concerns(&self, league: &LeagueId) -> bool {
        &self.league_id == league
    }
}

impl Event for StocksUpdated {
    fn topic(&self) -> &'static str {
        "stocksUpdated"
    }
}

/// The logged in user now goes by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameUpdated {
    pub username: String,
}

impl UsernameUpdated {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl Event for UsernameUpdated {
    fn topic(&self) -> &'static str {
        "usernameUpdated"
    }
}
