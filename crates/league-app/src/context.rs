//! Application context.

use league_api::{ApiConfig, HttpApi};
use league_config::AppConfig;
use league_core::error::{ApiError, DomainError, LeagueError, LeagueResult};
use league_core::traits::{Clock, KeyValueStore, LeagueApi};
use league_core::types::{LeagueId, Session};
use league_events::{EventBus, StocksUpdated, UsernameUpdated};
use league_store::{FileStore, SystemClock, TtlCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::auth::Auth;
use crate::catalog::Catalog;
use crate::leagues::Leagues;
use crate::session::SessionStore;
use crate::standings::Standings;
use crate::trading::Trading;

/// Owns every shared component of a running client.
pub struct AppContext {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    cache: TtlCache,
    bus: EventBus<StocksUpdated>,
    username_bus: EventBus<UsernameUpdated>,
    session: SessionStore,
    api: Arc<dyn LeagueApi>,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        api: Arc<dyn LeagueApi>,
        ttl: Duration,
    ) -> Self {
        let cache = TtlCache::with_ttl(store.clone(), clock.clone(), ttl);
        let session = SessionStore::new(store.clone());
        Self {
            store,
            clock,
            cache,
            bus: EventBus::new(),
            username_bus: EventBus::new(),
            session,
            api,
        }
    }

    /// Build the context from configuration: file store, system clock, HTTP API.
    pub fn init(config: &AppConfig) -> LeagueResult<Self> {
        let path = config.storage.resolved_path();
        let store = FileStore::open(&path)?;
        let api = HttpApi::new(ApiConfig::new(
            config.api.base_url.clone(),
            config.api.timeout(),
        ))?;

        info!(
            "Client ready: api {} storage {} ttl {}m",
            api.base_url(),
            path.display(),
            config.cache.ttl_minutes
        );

        Ok(Self::new(
            Arc::new(store),
            Arc::new(SystemClock),
            Arc::new(api),
            config.cache.ttl(),
        ))
    }

    /// Log out and drop every cached response.
    pub fn teardown(&self) {
        self.session.teardown(&self.cache);
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn bus(&self) -> &EventBus<StocksUpdated> {
        &self.bus
    }

    /// Told whenever the logged in user is renamed.
    pub fn username_bus(&self) -> &EventBus<UsernameUpdated> {
        &self.username_bus
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &Arc<dyn LeagueApi> {
        &self.api
    }

    pub fn current_session(&self) -> Session {
        self.session.load()
    }

    /// Access token, or "Please log in".
    pub fn require_token(&self) -> Result<String, DomainError> {
        self.session.access_token().ok_or(DomainError::NotLoggedIn)
    }

    /// Selected league, or "Please select a league first".
    pub fn require_league(&self) -> Result<LeagueId, DomainError> {
        self.session
            .selected_league()
            .ok_or(DomainError::NoLeagueSelected)
    }

    /// Token and selected league for a league-scoped call.
    pub fn require_league_session(&self) -> Result<(String, LeagueId), DomainError> {
        let token = self.require_token()?;
        let league = self.require_league()?;
        Ok((token, league))
    }

    /// Pass an API result through, expiring the session on 401.
    pub fn check<T>(&self, result: Result<T, ApiError>) -> LeagueResult<T> {
        match result {
            Err(e) if e.is_unauthorized() => {
                self.session.expire(&self.cache);
                Err(LeagueError::Api(e))
            }
            other => other.map_err(LeagueError::from),
        }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self)
    }

    pub fn trading(&self) -> Trading<'_> {
        Trading::new(self)
    }

    pub fn leagues(&self) -> Leagues<'_> {
        Leagues::new(self)
    }

    pub fn standings(&self) -> Standings<'_> {
        Standings::new(self)
    }
}
