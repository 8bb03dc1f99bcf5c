//! Cache entry encoding.
//!
//! An entry occupies two store keys: the JSON payload under the data key and the
//! write time (decimal epoch milliseconds) under the timestamp key. An entry missing
//! either half does not exist.

use league_core::error::StoreError;
use league_core::traits::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use crate::key::CacheKey;

/// A cached payload and the wall-clock time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub written_at_epoch_millis: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(payload: T, written_at_epoch_millis: i64) -> Self {
        Self {
            payload,
            written_at_epoch_millis,
        }
    }

    /// Age at `now_millis`. Entries stamped in the future have age zero.
    pub fn age(&self, now_millis: i64) -> Duration {
        let ms = now_millis.saturating_sub(self.written_at_epoch_millis).max(0);
        Duration::from_millis(ms as u64)
    }

    /// Whether the entry is younger than `ttl` at `now_millis`.
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        self.age(now_millis) < ttl
    }

    /// Time left before the entry goes stale.
    pub fn remaining(&self, now_millis: i64, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age(now_millis))
    }
}

pub(crate) fn store_entry<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &CacheKey,
    entry: &CacheEntry<T>,
) -> Result<(), StoreError> {
    let data = serde_json::to_string(&entry.payload)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let written = store
        .set(key.data_key(), &data)
        .and_then(|_| {
            store.set(
                key.timestamp_key(),
                &entry.written_at_epoch_millis.to_string(),
            )
        });

    if written.is_err() {
        // Never leave half an entry behind
        if let Err(e) = delete_entry(store, key) {
            warn!("Failed to clear partial cache entry {}: {}", key, e);
        }
    }
    written
}

pub(crate) fn load_entry<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &CacheKey,
) -> Result<Option<CacheEntry<T>>, StoreError> {
    let (Some(data), Some(stamp)) = (
        store.get(key.data_key())?,
        store.get(key.timestamp_key())?,
    ) else {
        return Ok(None);
    };

    let written_at_epoch_millis = stamp
        .trim()
        .parse::<i64>()
        .map_err(|e| StoreError::Serialization(format!("bad timestamp {:?}: {}", stamp, e)))?;
    let payload =
        serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(Some(CacheEntry {
        payload,
        written_at_epoch_millis,
    }))
}

pub(crate) fn delete_entry(store: &dyn KeyValueStore, key: &CacheKey) -> Result<(), StoreError> {
    store.remove(key.data_key())?;
    store.remove(key.timestamp_key())
}
