// ── Calendar source for the default sync window ──

use chrono::{Local, NaiveDate};

/// Source of "today" for requests that omit a date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The process's local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a day the way StoreHub's `from`/`to` parameters expect it.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
