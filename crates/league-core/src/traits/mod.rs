//! Core traits for the league client.

mod api;
mod clock;
mod store;

pub use api::LeagueApi;
pub use clock::Clock;
pub use store::KeyValueStore;
