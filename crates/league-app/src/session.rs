//! Session persisted in the durable store.

use league_core::error::StoreError;
use league_core::traits::KeyValueStore;
use league_core::types::{LeagueId, Session, TokenPair};
use league_store::{CacheKey, TtlCache};
use std::sync::Arc;
use tracing::{debug, info, warn};

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";
const USERNAME: &str = "username";
const SELECTED_LEAGUE: &str = "selected_league_id";

/// Tokens, username and selected league, stored under fixed keys.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("Failed to read {} from {} store: {}", key, self.store.name(), e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!("Failed to remove {}: {}", key, e);
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN)
    }

    pub fn username(&self) -> Option<String> {
        self.get(USERNAME)
    }

    /// The selected league. A malformed stored id reads as none.
    pub fn selected_league(&self) -> Option<LeagueId> {
        let raw = self.get(SELECTED_LEAGUE)?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring stored league id {:?}: {}", raw, e);
                None
            }
        }
    }

    pub fn load(&self) -> Session {
        Session {
            access_token: self.access_token(),
            refresh_token: self.get(REFRESH_TOKEN),
            username: self.username(),
            selected_league_id: self.selected_league(),
        }
    }

    /// Store the tokens and name of a freshly logged in user.
    pub fn save_login(&self, tokens: &TokenPair, username: &str) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN, &tokens.access)?;
        self.store.set(REFRESH_TOKEN, &tokens.refresh)?;
        self.store.set(USERNAME, username)?;
        info!("Logged in as {}", username);
        Ok(())
    }

    pub fn set_username(&self, username: &str) -> Result<(), StoreError> {
        self.store.set(USERNAME, username)
    }

    pub fn select_league(&self, league: &LeagueId) -> Result<(), StoreError> {
        self.store.set(SELECTED_LEAGUE, &league.to_string())?;
        debug!("Selected league {}", league);
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.remove(SELECTED_LEAGUE);
    }

    /// Forced logout after the server rejected the token.
    ///
    /// Drops the access token, the selected league and that league's holdings cache.
    /// The refresh token and username stay.
    pub fn expire(&self, cache: &TtlCache) {
        let league = self.selected_league();
        self.remove(ACCESS_TOKEN);
        self.remove(SELECTED_LEAGUE);
        if let Some(league) = league {
            cache.invalidate(&CacheKey::owned_stocks(&league));
        }
        warn!("Session expired");
    }

    /// Logout: drops both tokens and the selected league, and empties the cache.
    pub fn teardown(&self, cache: &TtlCache) {
        self.remove(ACCESS_TOKEN);
        self.remove(REFRESH_TOKEN);
        self.remove(SELECTED_LEAGUE);
        let cleared = cache.clear_all();
        info!("Logged out, cleared {} cache keys", cleared);
    }
}
