//! Session types.

use serde::{Deserialize, Serialize};

use super::LeagueId;

/// Username and password for `POST /api/token/` and registration.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Token pair issued by `POST /api/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Persisted client session.
///
/// There is no client-side expiry: the server signals it by answering 401.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub username: Option<String>,
    pub selected_league_id: Option<LeagueId>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Name to show for the current user.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("You")
    }
}
