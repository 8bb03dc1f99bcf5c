//! Leaderboard, schedule and head-to-head matchup.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;

/// One row of the league leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, deserialize_with = "de::decimal")]
    pub net_worth: Decimal,
    #[serde(default)]
    pub is_current_user: bool,
}

impl LeaderboardEntry {
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}

/// Response of `GET /api/leagues/{id}/leaderboard/`, ranked by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// 1-based rank of the current user.
    pub fn current_user_rank(&self) -> Option<usize> {
        self.leaderboard
            .iter()
            .position(|e| e.is_current_user)
            .map(|i| i + 1)
    }
}

/// One week in the participant's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatchup {
    pub week_number: u32,
    pub opponent_username: String,
    #[serde(default)]
    pub opponent_id: Option<i64>,
    #[serde(default)]
    pub is_current_week: bool,
    #[serde(default)]
    pub winner_id: Option<i64>,
    /// `None` until the week has been decided
    #[serde(default)]
    pub is_winner: Option<bool>,
}

impl ScheduledMatchup {
    /// `Week 3: alice vs bob ✓ (Won)`
    pub fn describe(&self, username: &str) -> String {
        let mut text = format!(
            "Week {}: {} vs {}",
            self.week_number, username, self.opponent_username
        );
        match self.is_winner {
            Some(true) => text.push_str(" ✓ (Won)"),
            Some(false) => text.push_str(" ✗ (Lost)"),
            None => {}
        }
        text
    }
}

/// Response of `GET /api/leagues/{id}/schedule/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub schedule: Vec<ScheduledMatchup>,
    #[serde(default)]
    pub current_week: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub league_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub league_end_date: Option<NaiveDate>,
}

/// Weekly profit of one stock in a matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStock {
    pub ticker: String,
    #[serde(default, deserialize_with = "de::decimal")]
    pub profit: Decimal,
}

/// One side of a head-to-head matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    /// Net worth
    #[serde(default, deserialize_with = "de::decimal")]
    pub value: Decimal,
    /// Weekly profit
    #[serde(default, deserialize_with = "de::decimal")]
    pub profit: Decimal,
    /// `wins-losses`
    #[serde(default)]
    pub record: String,
    #[serde(default)]
    pub stocks: Vec<TeamStock>,
}

/// Response of `GET /api/leagues/{id}/matchup/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    #[serde(default)]
    pub week_number: Option<u32>,
    pub player1: TeamSummary,
    pub player2: TeamSummary,
}

impl Matchup {
    /// The side currently ahead on weekly profit, if any.
    pub fn leader(&self) -> Option<&TeamSummary> {
        match self.player1.profit.cmp(&self.player2.profit) {
            std::cmp::Ordering::Greater => Some(&self.player1),
            std::cmp::Ordering::Less => Some(&self.player2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_describe() {
        let json = r#"{
            "schedule": [
                {"week_number": 1, "opponent_username": "bob", "opponent_id": 4,
                 "is_current_week": false, "winner_id": 2, "is_winner": true},
                {"week_number": 2, "opponent_username": "carol", "opponent_id": 5,
                 "is_current_week": false, "winner_id": 5, "is_winner": false},
                {"week_number": 3, "opponent_username": "dave", "opponent_id": 6,
                 "is_current_week": true, "winner_id": null, "is_winner": null}
            ],
            "current_week": 3,
            "league_start_date": "2026-10-05",
            "league_end_date": "2026-11-29"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.current_week, Some(3));
        assert_eq!(schedule.schedule[0].describe("alice"), "Week 1: alice vs bob ✓ (Won)");
        assert_eq!(schedule.schedule[1].describe("alice"), "Week 2: alice vs carol ✗ (Lost)");
        assert_eq!(schedule.schedule[2].describe("alice"), "Week 3: alice vs dave");
    }

    #[test]
    fn test_leaderboard_rank() {
        let json = r#"{"leaderboard": [
            {"username": "bob", "wins": 3, "losses": 0, "net_worth": 11200.5, "is_current_user": false},
            {"username": "alice", "wins": 2, "losses": 1, "net_worth": 10400.0, "is_current_user": true}
        ]}"#;
        let board: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(board.current_user_rank(), Some(2));
        assert_eq!(board.leaderboard[0].net_worth, dec!(11200.5));
        assert_eq!(board.leaderboard[1].record(), "2-1");
    }

    #[test]
    fn test_matchup_leader() {
        let json = r#"{"week_number": 2,
            "player1": {"name": "alice", "value": 10400.0, "profit": 120.5, "record": "1-0",
                        "stocks": [{"ticker": "AAA", "profit": 120.5}]},
            "player2": {"name": "bob", "value": 9900.0, "profit": -40.0, "record": "0-1", "stocks": []}}"#;
        let matchup: Matchup = serde_json::from_str(json).unwrap();
        assert_eq!(matchup.leader().map(|t| t.name.as_str()), Some("alice"));
        assert_eq!(matchup.player1.stocks[0].profit, dec!(120.5));
    }
}
