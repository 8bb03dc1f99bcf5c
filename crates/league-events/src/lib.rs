//! In-process invalidation bus.
//!
//! Views subscribe to typed events and are told synchronously when a mutation makes
//! their cached data stale.

mod bus;
mod events;

pub use bus::{EventBus, Subscription};
pub use events::{Event, StocksUpdated, UsernameUpdated};
