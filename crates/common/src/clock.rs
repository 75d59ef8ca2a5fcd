//! Clock utilities for export naming and timing.
//!
//! Export filenames carry the calendar date of the run. The date source is
//! injectable so that naming stays deterministic under test:
//! - [`SystemClock`] reads the current UTC date
//! - [`FixedClock`] always reports the same date
//! - [`Stopwatch`] measures elapsed time of individual export steps

use std::time::Instant;

use chrono::NaiveDate;

/// Source of the calendar date stamped into export filenames.
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;

    /// Current date as `YYYY-MM-DD`.
    fn iso_date(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Wall clock in UTC, matching an ISO-8601 timestamp cut to its date part.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

/// A clock frozen at one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Build from year/month/day, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Measures how long an export step took.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds elapsed since start.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
