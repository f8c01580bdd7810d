//! Calendars, day-count conventions, and the valuation clock.

pub mod calendar;
pub mod day_count;

pub use calendar::TradingCalendar;
pub use day_count::{DayCount, days_to_expiry, market_close, time_to_expiry};

use chrono::NaiveDateTime;

/// Valuation-instant policy for a chain context.
///
/// `Live` re-reads the wall clock (naive local time, assumed exchange-local)
/// on every evaluation, which is what a streaming consumer wants. `Fixed`
/// pins the instant so a snapshot evaluates reproducibly; every evaluation
/// path also accepts an explicit instant directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValuationClock {
    /// Re-read the wall clock on each use.
    Live,
    /// Evaluate as of this instant.
    Fixed(NaiveDateTime),
}

impl ValuationClock {
    /// Resolves the instant this clock currently denotes.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            Self::Live => chrono::Local::now().naive_local(),
            Self::Fixed(at) => *at,
        }
    }
}
