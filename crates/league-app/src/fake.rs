//! Recording in-process `LeagueApi` for service tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use league_core::error::ApiError;
use league_core::traits::LeagueApi;
use league_core::types::{
    Credentials, Holdings, Leaderboard, League, LeagueId, LeagueListing, LeagueMembership,
    Matchup, Schedule, Side, Stock, StockInfo, TokenPair, TradeReceipt, TradeRequest,
};
use league_store::{ManualClock, MemoryStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::context::AppContext;

pub const LEAGUE: &str = "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10";

/// 2026-10-18 12:00:00 UTC, a Sunday.
pub const NOW_MILLIS: i64 = 1_792_324_800_000;

pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub stocks: Mutex<Vec<Stock>>,
    pub holdings: Mutex<Holdings>,
    pub info: Mutex<StockInfo>,
    pub listing: Mutex<LeagueListing>,
    pub leaderboard: Mutex<Leaderboard>,
    pub schedule: Mutex<Schedule>,
    pub reject_token: AtomicBool,
    pub offline: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            stocks: Mutex::new(Vec::new()),
            holdings: Mutex::new(Holdings::default()),
            info: Mutex::new(StockInfo::default()),
            listing: Mutex::new(LeagueListing::default()),
            leaderboard: Mutex::new(Leaderboard::default()),
            schedule: Mutex::new(Schedule::default()),
            reject_token: AtomicBool::new(false),
            offline: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn authorize(&self, token: &str) -> Result<(), ApiError> {
        if self.reject_token.load(Ordering::SeqCst) || token.is_empty() {
            return Err(ApiError::Unauthorized {
                message: "Given token not valid for any token type".to_string(),
            });
        }
        Ok(())
    }

    pub fn set_listing(&self, leagues: Vec<LeagueMembership>, is_superuser: bool) {
        *self.listing.lock().unwrap() = LeagueListing {
            is_superuser,
            leagues,
        };
    }
}

pub fn league(id: &str, count: u32, start: Option<NaiveDate>) -> League {
    League {
        league_id: id.parse().unwrap(),
        name: "Friday Traders".to_string(),
        start_date: start,
        end_date: None,
        participant_count: count,
        can_set_start_date: false,
    }
}

pub fn membership(league: League, is_participant: bool) -> LeagueMembership {
    LeagueMembership {
        league,
        league_admin: true,
        is_participant,
    }
}

/// Context over a memory store and a manual clock at [`NOW_MILLIS`].
pub fn context(api: Arc<FakeApi>) -> (AppContext, Arc<FakeApi>, Arc<ManualClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        NOW_MILLIS,
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    ));
    let ctx = AppContext::new(store, clock.clone(), api.clone(), Duration::from_secs(30 * 60));
    (ctx, api, clock)
}

/// Context with a logged in user and the test league selected.
pub fn logged_in(api: Arc<FakeApi>) -> (AppContext, Arc<FakeApi>, Arc<ManualClock>) {
    let (ctx, api, clock) = context(api);
    let tokens = TokenPair {
        access: "tok".to_string(),
        refresh: "ref".to_string(),
    };
    ctx.session().save_login(&tokens, "alice").unwrap();
    ctx.session().select_league(&LEAGUE.parse().unwrap()).unwrap();
    (ctx, api, clock)
}

#[async_trait]
impl LeagueApi for FakeApi {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.record(format!("token {}", credentials.username))?;
        if credentials.password == "wrong-password" {
            return Err(ApiError::Rejected {
                status: 401,
                message: "No active account found with the given credentials".to_string(),
            });
        }
        Ok(TokenPair {
            access: format!("access-{}", credentials.username),
            refresh: format!("refresh-{}", credentials.username),
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.record(format!("register {}", credentials.username))
    }

    async fn update_username(&self, token: &str, username: &str) -> Result<String, ApiError> {
        self.record(format!("rename {}", username))?;
        self.authorize(token)?;
        Ok(username.to_string())
    }

    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.record("stocks".to_string())?;
        if self.reject_token.load(Ordering::SeqCst) {
            return Err(ApiError::Unauthorized {
                message: "Authentication credentials were not provided.".to_string(),
            });
        }
        Ok(self.stocks.lock().unwrap().clone())
    }

    async fn stock_info(
        &self,
        token: &str,
        league: &LeagueId,
        ticker: &str,
    ) -> Result<StockInfo, ApiError> {
        self.record(format!("info {} {}", league, ticker))?;
        self.authorize(token)?;
        Ok(self.info.lock().unwrap().clone())
    }

    async fn trade(
        &self,
        token: &str,
        side: Side,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, ApiError> {
        self.record(format!("{} {} {}", side, request.ticker, request.shares))?;
        self.authorize(token)?;
        let mut info = self.info.lock().unwrap();
        let amount = request.shares * info.current_price;
        match side {
            Side::Buy => {
                info.owned_shares += request.shares;
                info.balance -= amount;
            }
            Side::Sell => {
                info.owned_shares -= request.shares;
                info.balance += amount;
            }
        }
        Ok(TradeReceipt {
            message: None,
            new_balance: info.balance,
            shares_held: info.owned_shares,
            amount,
        })
    }

    async fn owned_stocks(&self, token: &str, league: &LeagueId) -> Result<Holdings, ApiError> {
        self.record(format!("owned {}", league))?;
        self.authorize(token)?;
        Ok(self.holdings.lock().unwrap().clone())
    }

    async fn list_leagues(&self, token: &str) -> Result<LeagueListing, ApiError> {
        self.record("leagues".to_string())?;
        self.authorize(token)?;
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn create_league(&self, token: &str, name: &str) -> Result<League, ApiError> {
        self.record(format!("create {}", name))?;
        self.authorize(token)?;
        let mut created = league(LEAGUE, 1, None);
        created.name = name.to_string();
        Ok(created)
    }

    async fn join_league(&self, token: &str, id: &LeagueId) -> Result<League, ApiError> {
        self.record(format!("join {}", id))?;
        self.authorize(token)?;
        Ok(league(&id.to_string(), 3, None))
    }

    async fn set_start_date(
        &self,
        token: &str,
        id: &LeagueId,
        start_date: NaiveDate,
    ) -> Result<League, ApiError> {
        self.record(format!("start {} {}", id, start_date))?;
        self.authorize(token)?;
        Ok(league(&id.to_string(), 8, Some(start_date)))
    }

    async fn delete_league(&self, token: &str, id: &LeagueId) -> Result<(), ApiError> {
        self.record(format!("delete {}", id))?;
        self.authorize(token)
    }

    async fn leaderboard(&self, token: &str, id: &LeagueId) -> Result<Leaderboard, ApiError> {
        self.record(format!("leaderboard {}", id))?;
        self.authorize(token)?;
        Ok(self.leaderboard.lock().unwrap().clone())
    }

    async fn schedule(&self, token: &str, id: &LeagueId) -> Result<Schedule, ApiError> {
        self.record(format!("schedule {}", id))?;
        self.authorize(token)?;
        Ok(self.schedule.lock().unwrap().clone())
    }

    async fn matchup(&self, token: &str, id: &LeagueId) -> Result<Matchup, ApiError> {
        self.record(format!("matchup {}", id))?;
        self.authorize(token)?;
        Err(ApiError::Rejected {
            status: 400,
            message: "League has not started yet".to_string(),
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}
