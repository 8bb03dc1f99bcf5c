//! Cache keys.

use league_core::types::LeagueId;
use std::fmt;

const STOCKS_PREFIX: &str = "stocks_cache";
const OWNED_STOCKS_PREFIX: &str = "owned_stocks_cache";

/// Store keys of one logical cache entry: the payload key and its timestamp key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    data: String,
    timestamp: String,
}

impl CacheKey {
    /// Every stock with its prices.
    pub fn stocks() -> Self {
        Self {
            data: STOCKS_PREFIX.to_string(),
            timestamp: format!("{}_timestamp", STOCKS_PREFIX),
        }
    }

    /// Holdings of the current user in one league.
    pub fn owned_stocks(league: &LeagueId) -> Self {
        Self {
            data: format!("{}_{}", OWNED_STOCKS_PREFIX, league),
            timestamp: format!("{}_timestamp_{}", OWNED_STOCKS_PREFIX, league),
        }
    }

    pub fn data_key(&self) -> &str {
        &self.data
    }

    pub fn timestamp_key(&self) -> &str {
        &self.timestamp
    }

    /// Prefixes covering every cache key family.
    pub fn all_prefixes() -> [&'static str; 2] {
        [STOCKS_PREFIX, OWNED_STOCKS_PREFIX]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let stocks = CacheKey::stocks();
        assert_eq!(stocks.data_key(), "stocks_cache");
        assert_eq!(stocks.timestamp_key(), "stocks_cache_timestamp");

        let id: LeagueId = "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10".parse().unwrap();
        let owned = CacheKey::owned_stocks(&id);
        assert_eq!(
            owned.data_key(),
            "owned_stocks_cache_7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10"
        );
        assert_eq!(
            owned.timestamp_key(),
            "owned_stocks_cache_timestamp_7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10"
        );
    }

    #[test]
    fn test_leagues_never_share_keys() {
        let a: LeagueId = "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10".parse().unwrap();
        let b: LeagueId = "0a6b1c2d-3e4f-4a5b-8c7d-9e0f1a2b3c4d".parse().unwrap();
        assert_ne!(CacheKey::owned_stocks(&a), CacheKey::owned_stocks(&b));
    }
}
