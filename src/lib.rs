//! Chainvol is an implied-volatility and Greeks engine for listed option chains:
//! exchange-style day counts, closed-form pricing, robust IV inversion, and a
//! per-chain facade that turns raw premium snapshots into analytics columns.
//!
//! The crate combines three layers: time-to-expiry derivation under calendar,
//! business-day, and trading-day conventions (with a 15:30 market close and an
//! exchange holiday calendar), Black-Scholes / Black-76 pricing with the
//! Abramowitz-Stegun normal CDF, and Brent-based implied-vol inversion with a
//! sentinel policy for unsolvable quotes. A chain context binds the observables
//! once per underlying and expiry and evaluates strikes cheaply after that.
//!
//! References used across modules include:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 13 and 19.
//! - Black (1976) for options on forwards and futures.
//! - Abramowitz and Stegun, *Handbook of Mathematical Functions*, Eq. 7.1.26.
//! - Brent (1973), *Algorithms for Minimization without Derivatives*, Ch. 4.
//!
//! Numerical considerations:
//! - The CDF approximation (absolute error < 7.5e-8) is used for both pricing
//!   and inversion, so IV round trips are exact to solver tolerance.
//! - The IV solver brackets sigma in [0.001, 5.0] with xtol 1e-12; any failure
//!   yields the sentinel lower bound 1e-11 rather than an error, and Greeks
//!   degrade along the documented sigma-floor branches.
//! - Day-count denominators are derived per call from the valuation and expiry
//!   years; nothing is baked in at definition time.
//!
//! When to use this crate vs alternatives:
//! - Use `chainvol` to reproduce exchange-style chain analytics (IV columns,
//!   scaled Greeks) from premium snapshots, including the Indian-market
//!   trading-day conventions.
//! - Use a general pricing library if you need surfaces, exotics, or term
//!   structures; this crate deliberately stops at per-strike closed forms.
//!
//! # Feature Flags
//! - `parallel`: enables Rayon-powered batch evaluation of full chains.
//!
//! # Quick Start
//! Price a Black-Scholes call:
//! ```rust
//! use chainvol::core::OptionType;
//! use chainvol::pricing::PricingModel;
//!
//! let px = PricingModel::BlackScholes.price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
//! assert!(px > 10.0 && px < 11.0);
//! ```
//!
//! Derive a time to expiry:
//! ```rust
//! use chainvol::time::{DayCount, TradingCalendar, time_to_expiry};
//! use chrono::NaiveDate;
//!
//! let cal = TradingCalendar::nse();
//! let valuation = NaiveDate::from_ymd_opt(2026, 8, 20)
//!     .unwrap()
//!     .and_hms_opt(15, 30, 0)
//!     .unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
//! let t = time_to_expiry(valuation, expiry, DayCount::CalendarDays, &cal);
//! assert!((t - 7.0 / 365.0).abs() < 1.0e-12);
//! ```
//!
//! Invert an implied volatility:
//! ```rust
//! use chainvol::core::OptionType;
//! use chainvol::pricing::PricingModel;
//! use chainvol::vol::implied_vol;
//!
//! let model = PricingModel::Black76;
//! let t = 7.0 / 365.0;
//! let market = model.price(OptionType::Call, 25005.0, 25100.0, 0.0, 0.11, t);
//! let sigma = implied_vol(market, |s| {
//!     model.price(OptionType::Call, 25005.0, 25100.0, 0.0, s, t)
//! });
//! assert!((sigma - 0.11).abs() < 1.0e-6);
//! ```
//!
//! Evaluate a chain strike end to end:
//! ```rust
//! use chainvol::chain::{AtmQuote, ChainContext, PricingMode, StrikeQuote};
//! use chainvol::time::{DayCount, TradingCalendar, ValuationClock};
//! use chrono::NaiveDate;
//!
//! let valuation = NaiveDate::from_ymd_opt(2026, 8, 20)
//!     .unwrap()
//!     .and_hms_opt(9, 15, 0)
//!     .unwrap();
//! let ctx = ChainContext::builder()
//!     .spot(25000.0)
//!     .atm(AtmQuote::new(25000.0, 150.0, 145.0))
//!     .expiry(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap())
//!     .day_count(DayCount::CalendarDays)
//!     .calendar(TradingCalendar::nse())
//!     .mode(PricingMode::ZeroRate)
//!     .clock(ValuationClock::Fixed(valuation))
//!     .build()
//!     .unwrap();
//!
//! let row = ctx
//!     .evaluate(&StrikeQuote::call_only(25100.0, 110.0))
//!     .unwrap()
//!     .expect("strike has a live quote");
//! assert!(row.impl_vol > 5.0 && row.impl_vol < 25.0);
//! ```

pub mod chain;
pub mod core;
pub mod math;
pub mod pricing;
pub mod time;
pub mod vol;

/// Common imports for ergonomic usage.
#[allow(ambiguous_glob_reexports)]
pub mod prelude {
    pub use crate::chain::*;
    pub use crate::core::*;
    pub use crate::pricing::*;
    pub use crate::time::*;
    pub use crate::vol::*;
}
