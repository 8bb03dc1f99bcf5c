//! Session handling and the services behind every screen of the client.
//!
//! Everything hangs off an [`AppContext`]: the durable store, the clock, the TTL
//! cache, the invalidation bus, the session and the API client.

mod context;
mod session;

pub mod auth;
pub mod catalog;
pub mod leagues;
pub mod pagination;
pub mod portfolio;
pub mod standings;
pub mod trading;

#[cfg(test)]
mod fake;

pub use auth::{Auth, MIN_PASSWORD_LEN};
pub use catalog::{Catalog, POPULAR_COUNT};
pub use context::AppContext;
pub use leagues::Leagues;
pub use pagination::{
    page_numbers, paginate, total_pages, Page, PageItem, HOLDINGS_PER_PAGE, STOCKS_PER_PAGE,
};
pub use portfolio::PortfolioView;
pub use session::SessionStore;
pub use standings::Standings;
pub use trading::{TradeOutcome, Trading};
