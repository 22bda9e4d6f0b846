//! Clock abstraction so "now" and "today" are injectable.
//!
//! Calendar arithmetic in the services is a function of the current date;
//! handlers and caches take an `Arc<dyn Clock>` instead of reading the
//! system time directly.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// The current calendar date, with time-of-day stripped.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation used by the running services.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and TTL checks.
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock poisoned") = now;
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }

    fn today(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}
