//! Clock implementations.

use chrono::{Local, NaiveDate, Utc};
use league_core::traits::Clock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    millis: AtomicI64,
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(start_millis: i64, today: NaiveDate) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
            today: Mutex::new(today),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn set_today(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.today.lock() {
            *guard = today;
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        self.today
            .lock()
            .map(|d| *d)
            .unwrap_or(NaiveDate::MIN)
    }
}
