//! Module `time::day_count`.
//!
//! Derives days-to-expiry (DTE) and time-to-expiry (TTE) under the three
//! chain conventions: calendar days over a fixed 365-day year, weekday
//! counting, and trading-day counting net of exchange holidays.
//!
//! References: Hull (11th ed.) Ch. 4 for accrual conventions; the discrete
//! conventions follow exchange practice for Indian index derivatives.
//!
//! Key types and purpose: `DayCount` selects the convention; `days_to_expiry`
//! and `time_to_expiry` are the free entry points used by chain contexts.
//!
//! Numerical considerations: the annualization denominator is derived per
//! call from the actual valuation and expiry years (same-year, one-year-span,
//! and multi-year branches), never from totals fixed at definition time, so a
//! context straddling New Year stays consistent without rebuilds.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::time::TradingCalendar;

const SECS_PER_DAY: f64 = 86_400.0;

/// Day-count conventions for option time-to-expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCount {
    /// Actual elapsed time to the expiry close over a fixed 365-day year.
    CalendarDays,
    /// Monday-Friday day count over the weekday count of the relevant years.
    BusinessDays,
    /// Weekdays net of exchange holidays over the trading-day count of the
    /// relevant years.
    TradingDays,
}

/// Exchange close for index derivatives: 15:30 local.
pub fn market_close() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 30, 0).expect("valid time")
}

/// Whole-day count for the discrete conventions over `[from, to)`.
fn discrete_days(
    convention: DayCount,
    calendar: &TradingCalendar,
    from: NaiveDate,
    to: NaiveDate,
) -> i64 {
    match convention {
        DayCount::TradingDays => calendar.trading_day_count(from, to),
        _ => calendar.business_day_count(from, to),
    }
}

fn jan1(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date")
}

/// Fractional days from `valuation` to the expiry close.
///
/// Under `CalendarDays` this is the exact elapsed time to `expiry` at 15:30.
/// Under the discrete conventions the day count runs over
/// `[valuation.date(), expiry]` inclusive, then sheds the close-to-midnight
/// gap (8h30m) and the time already elapsed since midnight of the valuation
/// day, so the result decays intraday exactly as the calendar variant does.
///
/// Holidays reduce the count only under `TradingDays`.
///
/// The result is negative once valuation is past the expiry close; callers
/// decide whether that is an error.
pub fn days_to_expiry(
    valuation: NaiveDateTime,
    expiry: NaiveDate,
    convention: DayCount,
    calendar: &TradingCalendar,
) -> f64 {
    match convention {
        DayCount::CalendarDays => {
            let close = expiry.and_time(market_close());
            (close - valuation).num_seconds() as f64 / SECS_PER_DAY
        }
        DayCount::BusinessDays | DayCount::TradingDays => {
            let end = expiry + Duration::days(1);
            let counted = discrete_days(convention, calendar, valuation.date(), end) as f64;
            let close_to_midnight = SECS_PER_DAY - f64::from(market_close().num_seconds_from_midnight());
            let elapsed = f64::from(valuation.time().num_seconds_from_midnight());
            counted - (close_to_midnight + elapsed) / SECS_PER_DAY
        }
    }
}

/// Annualized time to expiry (year fraction) for `valuation` against the
/// expiry close.
///
/// The denominator under `CalendarDays` is a fixed 365. For the discrete
/// conventions it is derived from the years actually spanned:
/// - same year: the day count of the valuation year;
/// - expiry in the next year: remaining days of the valuation year plus the
///   full expiry year;
/// - two or more years out: the direct day count to expiry (inclusive).
///
/// # Examples
/// ```
/// use chainvol::time::{DayCount, TradingCalendar, time_to_expiry};
/// use chrono::NaiveDate;
///
/// let cal = TradingCalendar::nse();
/// let valuation = NaiveDate::from_ymd_opt(2026, 8, 20)
///     .unwrap()
///     .and_hms_opt(15, 30, 0)
///     .unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
/// let t = time_to_expiry(valuation, expiry, DayCount::CalendarDays, &cal);
/// assert!((t - 7.0 / 365.0).abs() < 1.0e-12);
/// ```
pub fn time_to_expiry(
    valuation: NaiveDateTime,
    expiry: NaiveDate,
    convention: DayCount,
    calendar: &TradingCalendar,
) -> f64 {
    days_to_expiry(valuation, expiry, convention, calendar)
        / annualization_days(valuation.date(), expiry, convention, calendar)
}

fn annualization_days(
    valuation: NaiveDate,
    expiry: NaiveDate,
    convention: DayCount,
    calendar: &TradingCalendar,
) -> f64 {
    if convention == DayCount::CalendarDays {
        return 365.0;
    }
    let days = match expiry.year() - valuation.year() {
        0 => discrete_days(convention, calendar, jan1(valuation.year()), jan1(valuation.year() + 1)),
        1 => {
            discrete_days(convention, calendar, valuation, jan1(expiry.year()))
                + discrete_days(convention, calendar, jan1(expiry.year()), jan1(expiry.year() + 1))
        }
        _ => discrete_days(convention, calendar, valuation, expiry + Duration::days(1)),
    };
    days as f64
}
