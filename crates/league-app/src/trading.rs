//! Buying and selling.

use league_core::error::{DomainError, LeagueResult};
use league_core::types::{LeagueId, Side, StockInfo, TradeReceipt, TradeRequest};
use league_events::StocksUpdated;
use league_store::CacheKey;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::context::AppContext;

/// Result of a completed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub side: Side,
    pub ticker: String,
    pub shares: Decimal,
    pub receipt: TradeReceipt,
    /// Balance and position after the trade, if the follow-up fetch succeeded
    pub info: Option<StockInfo>,
}

impl TradeOutcome {
    pub fn message(&self) -> String {
        self.receipt.message_or(self.side)
    }
}

pub struct Trading<'a> {
    ctx: &'a AppContext,
}

impl<'a> Trading<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Balance and owned shares of `ticker` in the selected league.
    pub async fn stock_info(&self, ticker: &str) -> LeagueResult<StockInfo> {
        let (token, league) = self.ctx.require_league_session()?;
        let result = self.ctx.api().stock_info(&token, &league, ticker).await;
        self.ctx.check(result)
    }

    pub async fn buy(&self, ticker: &str, shares: Decimal) -> LeagueResult<TradeOutcome> {
        self.execute(Side::Buy, ticker, shares).await
    }

    /// Sell shares; never more than currently owned.
    pub async fn sell(&self, ticker: &str, shares: Decimal) -> LeagueResult<TradeOutcome> {
        self.execute(Side::Sell, ticker, shares).await
    }

    async fn execute(
        &self,
        side: Side,
        ticker: &str,
        shares: Decimal,
    ) -> LeagueResult<TradeOutcome> {
        let (token, league) = self.ctx.require_league_session()?;
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(DomainError::Required("Ticker").into());
        }
        if shares <= Decimal::ZERO {
            return Err(DomainError::InvalidShares.into());
        }

        if side == Side::Sell {
            let held = self.stock_info(&ticker).await?;
            if shares > held.owned_shares {
                return Err(DomainError::InsufficientShares {
                    owned: held.owned_shares,
                    requested: shares,
                }
                .into());
            }
        }

        let request = TradeRequest::new(league, ticker.clone(), shares);
        let result = self.ctx.api().trade(&token, side, &request).await;
        let receipt = self.ctx.check(result)?;
        info!("{} {} {} in league {}", side, shares, ticker, league);

        self.holdings_changed(&league);

        let info = match self.stock_info(&ticker).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Could not refresh {} after {}: {}", ticker, side, e);
                None
            }
        };

        Ok(TradeOutcome {
            side,
            ticker,
            shares,
            receipt,
            info,
        })
    }

    /// Drop the league's holdings cache and tell live views about it.
    fn holdings_changed(&self, league: &LeagueId) {
        self.ctx.cache().invalidate(&CacheKey::owned_stocks(league));
        self.ctx.bus().publish(&StocksUpdated::new(*league));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{context, logged_in, FakeApi, LEAGUE};
    use league_core::error::LeagueError;
    use league_core::types::Holdings;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn priced(api: &FakeApi, owned: Decimal) {
        *api.info.lock().unwrap() = StockInfo {
            balance: dec!(10000),
            owned_shares: owned,
            current_price: dec!(12.5),
        };
    }

    #[tokio::test]
    async fn test_buy_invalidates_and_notifies_once() {
        let (ctx, api, _) = logged_in(FakeApi::new());
        priced(&api, dec!(0));
        let league: LeagueId = LEAGUE.parse().unwrap();
        let key = CacheKey::owned_stocks(&league);
        ctx.cache().write(&key, &Holdings::default());

        let events = Arc::new(AtomicUsize::new(0));
        let seen = events.clone();
        let sub = ctx.bus().subscribe(move |e: &StocksUpdated| {
            if e.concerns(&league) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        let outcome = ctx.trading().buy("aaa", dec!(5)).await.unwrap();

        assert_eq!(ctx.cache().read::<Holdings>(&key), None);
        assert_eq!(events.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.ticker, "AAA");
        assert_eq!(outcome.receipt.shares_held, dec!(5));
        assert_eq!(outcome.info.as_ref().unwrap().owned_shares, dec!(5));
        assert_eq!(outcome.message(), "Stock purchased successfully");
        assert!(sub.unsubscribe());
    }

    #[tokio::test]
    async fn test_invalid_shares_rejected_locally() {
        let (ctx, api, _) = logged_in(FakeApi::new());
        for shares in [dec!(0), dec!(-1)] {
            let err = ctx.trading().buy("AAA", shares).await.unwrap_err();
            assert!(matches!(err, LeagueError::Domain(DomainError::InvalidShares)));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cannot_sell_more_than_owned() {
        let (ctx, api, _) = logged_in(FakeApi::new());
        priced(&api, dec!(2));

        let err = ctx.trading().sell("AAA", dec!(3)).await.unwrap_err();
        assert_eq!(err.to_string(), "You only own 2 shares");
        assert_eq!(api.count("sell"), 0);

        let outcome = ctx.trading().sell("AAA", dec!(2)).await.unwrap();
        assert_eq!(outcome.receipt.shares_held, dec!(0));
        assert_eq!(api.count("sell"), 1);
    }

    #[tokio::test]
    async fn test_trade_needs_selected_league() {
        let (ctx, api, _) = context(FakeApi::new());
        ctx.store().set("access_token", "tok").unwrap();

        let err = ctx.trading().buy("AAA", dec!(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a league first");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_trade_keeps_cache() {
        let (ctx, api, _) = logged_in(FakeApi::new());
        let league: LeagueId = LEAGUE.parse().unwrap();
        let key = CacheKey::owned_stocks(&league);
        ctx.cache().write(&key, &Holdings::default());
        api.offline.store(true, Ordering::SeqCst);

        let err = ctx.trading().buy("AAA", dec!(1)).await.unwrap_err();
        assert_eq!(err.user_message(), "Network error. Please try again.");
        assert!(ctx.cache().read::<Holdings>(&key).is_some());
    }

    #[tokio::test]
    async fn test_expired_token_on_trade_forces_logout() {
        let (ctx, api, _) = logged_in(FakeApi::new());
        api.reject_token.store(true, Ordering::SeqCst);

        let err = ctx.trading().buy("AAA", dec!(1)).await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(ctx.session().access_token(), None);
        assert_eq!(ctx.session().selected_league(), None);
    }
}
