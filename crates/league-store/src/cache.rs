//! TTL read-through cache over a [`KeyValueStore`].
//!
//! Entries expire by wall-clock age. Reads never fail: a missing, expired, corrupt or
//! unreadable entry is a miss, and failed writes are logged and dropped. There is no
//! cross-process coordination; two writers of the same key race and the last write
//! wins.

use league_core::traits::{Clock, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::codec::{delete_entry, load_entry, store_entry, CacheEntry};
use crate::key::CacheKey;

/// Default time-to-live of cached responses (30 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Where a value returned by [`TtlCache::get_or_fetch`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cache,
    Network,
}

/// A value with its cache provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub source: CacheSource,
    /// Age of the entry when it was read
    pub age: Duration,
    /// Time until the entry expires (zero when the value was not stored)
    pub remaining: Duration,
}

impl<T> Cached<T> {
    pub fn is_cached(&self) -> bool {
        self.source == CacheSource::Cache
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cached<U> {
        Cached {
            value: f(self.value),
            source: self.source,
            age: self.age,
            remaining: self.remaining,
        }
    }
}

/// Read-through cache with a fixed time-to-live.
#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(store, clock, DEFAULT_TTL)
    }

    pub fn with_ttl(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Read a fresh entry with its write time.
    ///
    /// Expired and corrupt entries are removed and reported as absent.
    pub fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<CacheEntry<T>> {
        let entry = match load_entry::<T>(self.store.as_ref(), key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!("Dropping unreadable cache entry {}: {}", key, e);
                self.invalidate(key);
                return None;
            }
        };

        let now = self.clock.now_millis();
        if !entry.is_fresh(now, self.ttl) {
            debug!("Cache entry {} expired ({:?} old)", key, entry.age(now));
            self.invalidate(key);
            return None;
        }
        Some(entry)
    }

    /// Write `value` stamped with the current time.
    ///
    /// # Returns
    /// Whether the entry was stored. A failed write leaves no entry behind.
    pub fn write<T: Serialize>(&self, key: &CacheKey, value: &T) -> bool {
        let entry = CacheEntry::new(value, self.clock.now_millis());
        match store_entry(self.store.as_ref(), key, &entry) {
            Ok(()) => {
                debug!("Cached {}", key);
                true
            }
            Err(e) => {
                warn!("Failed to cache {}: {}", key, e);
                false
            }
        }
    }

    /// Remove both halves of an entry.
    pub fn invalidate(&self, key: &CacheKey) {
        if let Err(e) = delete_entry(self.store.as_ref(), key) {
            warn!("Failed to invalidate {}: {}", key, e);
        }
    }

    /// Remove every cache entry, leaving other stored keys alone.
    pub fn clear_all(&self) -> usize {
        CacheKey::all_prefixes()
            .iter()
            .map(|prefix| match self.store.remove_prefixed(prefix) {
                Ok(n) => n,
                Err(e) => {
                    warn!("Failed to clear cache entries under {}: {}", prefix, e);
                    0
                }
            })
            .sum()
    }

    /// Return the cached value, or fetch, store and return a fresh one.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_fetch_if(key, fetch, |_| true).await
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch), but only stores fetched values
    /// accepted by `cacheable`.
    pub async fn get_or_fetch_if<T, E, F, Fut, P>(
        &self,
        key: &CacheKey,
        fetch: F,
        cacheable: P,
    ) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnOnce(&T) -> bool,
    {
        if let Some(entry) = self.read::<T>(key) {
            let now = self.clock.now_millis();
            debug!("Cache hit for {}", key);
            return Ok(Cached {
                age: entry.age(now),
                remaining: entry.remaining(now, self.ttl),
                value: entry.payload,
                source: CacheSource::Cache,
            });
        }

        let value = fetch().await?;
        let stored = cacheable(&value) && self.write(key, &value);
        Ok(Cached {
            value,
            source: CacheSource::Network,
            age: Duration::ZERO,
            remaining: if stored { self.ttl } else { Duration::ZERO },
        })
    }
}
