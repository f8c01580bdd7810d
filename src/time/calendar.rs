//! Module `time::calendar`.
//!
//! Trading calendar with a Monday-Friday weekmask and an immutable holiday
//! set, counting days with half-open `[from, to)` semantics.
//!
//! Key types and purpose: `TradingCalendar` is the single calendar shape used
//! by the day-count engine; holiday-free counting gives business days,
//! holiday-aware counting gives trading days.
//!
//! The calendar is static configuration data: load it once and share it
//! read-only across every chain context for the session.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Published NSE trade holidays for calendar years 2025 and 2026.
const NSE_HOLIDAYS_2025_2026: [(i32, u32, u32); 29] = [
    (2025, 2, 26),
    (2025, 3, 14),
    (2025, 3, 31),
    (2025, 4, 10),
    (2025, 4, 14),
    (2025, 4, 18),
    (2025, 5, 1),
    (2025, 8, 15),
    (2025, 8, 27),
    (2025, 10, 2),
    (2025, 10, 21),
    (2025, 10, 22),
    (2025, 11, 5),
    (2025, 12, 25),
    (2026, 1, 26),
    (2026, 3, 3),
    (2026, 3, 26),
    (2026, 3, 31),
    (2026, 4, 3),
    (2026, 4, 14),
    (2026, 5, 1),
    (2026, 5, 28),
    (2026, 6, 26),
    (2026, 9, 14),
    (2026, 10, 2),
    (2026, 10, 20),
    (2026, 11, 10),
    (2026, 11, 24),
    (2026, 12, 25),
];

/// Exchange trading calendar: Monday-Friday weekmask plus a holiday set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl TradingCalendar {
    /// Weekday-only calendar with an empty holiday set.
    pub fn weekdays_only() -> Self {
        Self::default()
    }

    /// Builds a calendar from an explicit holiday list.
    ///
    /// Weekend dates in the list are harmless: they are already non-trading
    /// under the weekmask.
    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Calendar seeded with the published NSE trade holidays for 2025-2026.
    ///
    /// Years outside that window degrade to plain weekday counting; refresh
    /// the list through [`TradingCalendar::with_holidays`] when the exchange
    /// publishes new dates.
    pub fn nse() -> Self {
        Self::with_holidays(
            NSE_HOLIDAYS_2025_2026
                .iter()
                .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid holiday date")),
        )
    }

    /// True when `date` falls Monday through Friday.
    pub fn is_weekday(date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// True when `date` is in the holiday set.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// True when the exchange is open on `date`: a weekday and not a holiday.
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        Self::is_weekday(date) && !self.is_holiday(date)
    }

    /// Weekdays in `[from, to)`, holidays ignored. Empty or reversed ranges
    /// count zero.
    pub fn business_day_count(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        self.count_days(from, to, false)
    }

    /// Trading days in `[from, to)`: weekdays net of holidays. Empty or
    /// reversed ranges count zero.
    pub fn trading_day_count(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        self.count_days(from, to, true)
    }

    /// Read-only view of the holiday set.
    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    fn count_days(&self, from: NaiveDate, to: NaiveDate, skip_holidays: bool) -> i64 {
        let mut count = 0;
        let mut day = from;
        while day < to {
            if Self::is_weekday(day) && !(skip_holidays && self.is_holiday(day)) {
                count += 1;
            }
            day = day.succ_opt().expect("date within chrono range");
        }
        count
    }
}
