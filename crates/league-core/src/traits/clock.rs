//! Clock trait definition.

use chrono::NaiveDate;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// The user's local calendar date.
    fn today(&self) -> NaiveDate;
}
