//! League types and the client-side league rules.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::de;
use crate::error::DomainError;

/// Number of participants a league needs before it can be played.
pub const LEAGUE_SIZE: u32 = 8;

/// League identifier (a UUID assigned by the server).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(Uuid);

impl LeagueId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for LeagueId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::Required("League ID"));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidLeagueId(s.to_string()))
    }
}

/// A league as serialized by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub league_id: LeagueId,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub can_set_start_date: bool,
}

impl League {
    pub fn is_full(&self) -> bool {
        self.participant_count >= LEAGUE_SIZE
    }

    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.start_date.is_some_and(|d| d <= today)
    }
}

/// The user's relation to a league in the league listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueMembership {
    pub league: League,
    #[serde(rename = "leagueAdmin", default)]
    pub league_admin: bool,
    #[serde(rename = "isParticipant", default = "default_true")]
    pub is_participant: bool,
}

fn default_true() -> bool {
    true
}

/// Whether a league may be chosen as the active league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selectability {
    Selectable,
    /// Superusers see every league but may only play in their own
    NotParticipant,
    NotFull { count: u32 },
}

impl Selectability {
    pub fn is_selectable(&self) -> bool {
        matches!(self, Selectability::Selectable)
    }

    /// Convert into the rule violation it represents.
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Selectability::Selectable => Ok(()),
            Selectability::NotParticipant => Err(DomainError::NotParticipant),
            Selectability::NotFull { count } => Err(DomainError::LeagueNotFull { count }),
        }
    }
}

impl LeagueMembership {
    /// Selection rule: participants only, and only once the league is full.
    pub fn selectability(&self, is_superuser: bool) -> Selectability {
        if is_superuser && !self.is_participant {
            return Selectability::NotParticipant;
        }
        if !self.league.is_full() {
            return Selectability::NotFull {
                count: self.league.participant_count,
            };
        }
        Selectability::Selectable
    }
}

/// Response of `GET /api/leagues/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueListing {
    pub is_superuser: bool,
    pub leagues: Vec<LeagueMembership>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingWire {
    Object {
        #[serde(default)]
        is_superuser: bool,
        #[serde(default)]
        leagues: Vec<LeagueMembership>,
    },
    Legacy(Vec<LeagueMembership>),
}

impl<'de> Deserialize<'de> for LeagueListing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ListingWire::deserialize(deserializer)? {
            ListingWire::Object {
                is_superuser,
                leagues,
            } => LeagueListing {
                is_superuser,
                leagues,
            },
            ListingWire::Legacy(leagues) => LeagueListing {
                is_superuser: false,
                leagues,
            },
        })
    }
}

impl LeagueListing {
    pub fn find(&self, id: &LeagueId) -> Option<&LeagueMembership> {
        self.leagues.iter().find(|m| &m.league.league_id == id)
    }

    pub fn selectability(&self, id: &LeagueId) -> Option<Selectability> {
        self.find(id).map(|m| m.selectability(self.is_superuser))
    }
}

/// The first Monday on or after `today`.
pub fn next_monday_on_or_after(today: NaiveDate) -> NaiveDate {
    let days = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Days::new(u64::from(days))
}

/// Client-side start date rule: a Monday, no earlier than the next Monday on or after today.
pub fn validate_start_date(date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    if date.weekday() != Weekday::Mon {
        return Err(DomainError::NotMonday(date, date.weekday()));
    }
    let earliest = next_monday_on_or_after(today);
    if date < earliest {
        return Err(DomainError::StartDateTooEarly { earliest });
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` start date.
pub fn parse_start_date(input: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}
