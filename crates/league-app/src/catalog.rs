//! Stock catalog: cached listing, search and the popular row.

use league_core::error::{LeagueError, LeagueResult};
use league_core::types::{Stock, StockSnapshot};
use league_store::{CacheKey, Cached};
use tracing::debug;

use crate::context::AppContext;

/// Stocks shown in the popular row.
pub const POPULAR_COUNT: usize = 8;

pub struct Catalog<'a> {
    ctx: &'a AppContext,
}

impl<'a> Catalog<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// All stocks, from the cache while it is fresh.
    ///
    /// An empty listing is returned but never cached. The listing is public, so a 401
    /// here does not end the session.
    pub async fn stocks(&self) -> LeagueResult<Cached<Vec<Stock>>> {
        let api = self.ctx.api();
        let cached = self
            .ctx
            .cache()
            .get_or_fetch_if(
                &CacheKey::stocks(),
                || async move { api.list_stocks().await },
                |stocks: &Vec<Stock>| !stocks.is_empty(),
            )
            .await;
        let cached = cached.map_err(LeagueError::from)?;
        debug!(
            "{} stocks from {:?}, {:?} until refresh",
            cached.value.len(),
            cached.source,
            cached.remaining
        );
        Ok(cached)
    }

    /// Display snapshots matching `term` (blank matches everything).
    pub async fn search(&self, term: &str) -> LeagueResult<Vec<StockSnapshot>> {
        let stocks = self.stocks().await?;
        Ok(search(&stocks.value, term)
            .into_iter()
            .map(Stock::snapshot)
            .collect())
    }

    /// Look up one stock by ticker, case-insensitively.
    pub async fn find(&self, ticker: &str) -> LeagueResult<Option<Stock>> {
        let stocks = self.stocks().await?;
        Ok(stocks
            .value
            .into_iter()
            .find(|s| s.ticker.eq_ignore_ascii_case(ticker.trim())))
    }
}

/// Stocks whose ticker or name contains `term`, in listing order.
pub fn search<'s>(stocks: &'s [Stock], term: &str) -> Vec<&'s Stock> {
    stocks.iter().filter(|s| s.matches(term)).collect()
}

/// The first [`POPULAR_COUNT`] stocks of the listing.
pub fn popular(stocks: &[Stock]) -> &[Stock] {
    &stocks[..stocks.len().min(POPULAR_COUNT)]
}
