//! Time source used by the coordinator.
//!
//! Engines never read the wall clock themselves; every operation that needs
//! "now" or "today" receives it as an argument. The [`Clock`] trait is where
//! those values come from, so tests can pin them.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" follows the local time zone, which is what a user
/// means when they tick off a habit before midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Noon UTC on the given day.
    pub fn on(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(noon.and_utc())
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
