//! Key/value store trait definition.

use crate::error::StoreError;

/// Durable string key/value storage shared by the whole process.
///
/// Each call is a single atomic operation. There are no transactions: callers that
/// read, then write, race with other writers and the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Remove every key starting with `prefix`, returning how many were removed.
    fn remove_prefixed(&self, prefix: &str) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in self.keys()? {
            if key.starts_with(prefix) {
                self.remove(&key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Store name for diagnostics.
    fn name(&self) -> &str;
}
