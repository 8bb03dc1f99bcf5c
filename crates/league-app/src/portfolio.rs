//! Holdings view of one league.

use league_core::error::LeagueResult;
use league_core::types::{Holding, Holdings, LeagueId};
use league_events::{StocksUpdated, Subscription};
use league_store::{CacheKey, Cached};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::context::AppContext;
use crate::pagination::{paginate, Page, HOLDINGS_PER_PAGE};

/// Live holdings of the current user in one league.
///
/// Loads through the league's owned-stocks cache. While attached to the bus it is
/// marked stale whenever a trade in its league completes.
pub struct PortfolioView<'a> {
    ctx: &'a AppContext,
    league: LeagueId,
    stale: Arc<AtomicBool>,
    subscription: Option<Subscription>,
    current: Option<Cached<Holdings>>,
}

impl<'a> PortfolioView<'a> {
    pub fn new(ctx: &'a AppContext, league: LeagueId) -> Self {
        Self {
            ctx,
            league,
            stale: Arc::new(AtomicBool::new(true)),
            subscription: None,
            current: None,
        }
    }

    /// View of the selected league.
    pub fn for_selected(ctx: &'a AppContext) -> LeagueResult<Self> {
        let league = ctx.require_league()?;
        Ok(Self::new(ctx, league))
    }

    pub fn league(&self) -> &LeagueId {
        &self.league
    }

    /// Start listening for trades in this league.
    pub fn attach(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let league = self.league;
        let stale = Arc::clone(&self.stale);
        self.subscription = Some(self.ctx.bus().subscribe(move |e: &StocksUpdated| {
            if e.concerns(&league) {
                stale.store(true, Ordering::SeqCst);
            }
        }));
    }

    /// Stop listening. Returns whether a subscription was removed.
    pub fn detach(&mut self) -> bool {
        self.subscription
            .take()
            .is_some_and(Subscription::unsubscribe)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Load holdings, from the cache while it is fresh.
    pub async fn load(&mut self) -> LeagueResult<&Cached<Holdings>> {
        let token = self.ctx.require_token()?;
        let api = self.ctx.api();
        let league = self.league;
        let token = token.as_str();
        let result = self
            .ctx
            .cache()
            .get_or_fetch(&CacheKey::owned_stocks(&league), || async move {
                api.owned_stocks(token, &league).await
            })
            .await;
        let cached = self.ctx.check(result)?;
        debug!(
            "{} holdings in {} from {:?}",
            cached.value.stocks.len(),
            league,
            cached.source
        );

        self.stale.store(false, Ordering::SeqCst);
        Ok(self.current.insert(cached))
    }

    /// Reload if a trade happened since the last load.
    ///
    /// # Returns
    /// Whether a reload took place
    pub async fn refresh_if_stale(&mut self) -> LeagueResult<bool> {
        if !self.is_stale() {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    pub fn holdings(&self) -> Option<&Holdings> {
        self.current.as_ref().map(|c| &c.value)
    }

    pub fn cached(&self) -> Option<&Cached<Holdings>> {
        self.current.as_ref()
    }

    /// One page of holdings, nine per page.
    pub fn page(&self, page: usize) -> Page<'_, Holding> {
        let stocks = self.holdings().map(|h| h.stocks.as_slice()).unwrap_or(&[]);
        paginate(stocks, HOLDINGS_PER_PAGE, page)
    }
}

impl Drop for PortfolioView<'_> {
    fn drop(&mut self) {
        self.detach();
    }
}
