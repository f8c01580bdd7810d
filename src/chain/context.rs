//! Module `chain::context`.
//!
//! The per-chain evaluation facade. A `ChainContext` is bound once per
//! underlying and expiry through a validating builder, then evaluates
//! strikes cheaply: each call re-derives time to expiry from the valuation
//! clock, inverts the side premiums, picks the representative IV by
//! moneyness, and assembles a scaled, rounded analytics row.
//!
//! Key types and purpose: `ChainContextBuilder` validates the chain-level
//! observables; `ChainContext::evaluate`/`evaluate_chain` are the entry
//! points, with `_at` variants taking an explicit valuation instant for
//! reproducible runs.
//!
//! Numerical considerations: per-strike failures are isolated. A strike
//! without a usable quote yields `None` while the rest of a batch proceeds;
//! only an expired context (time to expiry not positive) is an error.

use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::chain::PricingMode;
use crate::chain::quotes::{AtmQuote, StrikeAnalytics, StrikeQuote, round_dp};
use crate::core::{EngineError, OptionType};
use crate::pricing;
use crate::time::{DayCount, TradingCalendar, ValuationClock, time_to_expiry};
use crate::vol::implied_vol;

/// Builder for [`ChainContext`]. Spot, ATM quote, and expiry are required;
/// the rest default to calendar-day counting, the NSE holiday calendar, the
/// spot-based convention, and a live clock.
#[derive(Debug, Clone, Default)]
pub struct ChainContextBuilder {
    spot: Option<f64>,
    future: Option<f64>,
    atm: Option<AtmQuote>,
    expiry: Option<NaiveDate>,
    day_count: Option<DayCount>,
    calendar: Option<TradingCalendar>,
    mode: Option<PricingMode>,
    clock: Option<ValuationClock>,
}

impl ChainContextBuilder {
    /// Underlying spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Quoted future price for the expiry, when one trades.
    pub fn future(mut self, future: f64) -> Self {
        self.future = Some(future);
        self
    }

    /// At-the-money call/put premiums and strike.
    pub fn atm(mut self, atm: AtmQuote) -> Self {
        self.atm = Some(atm);
        self
    }

    /// Contract expiry date; the close is fixed at 15:30.
    pub fn expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Day-count convention for time to expiry.
    pub fn day_count(mut self, day_count: DayCount) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Trading calendar shared by every evaluation.
    pub fn calendar(mut self, calendar: TradingCalendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Pricing convention (reference price, rate, and model family).
    pub fn mode(mut self, mode: PricingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Valuation clock; defaults to the live wall clock.
    pub fn clock(mut self, clock: ValuationClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validates the observables and builds the context.
    pub fn build(self) -> Result<ChainContext, EngineError> {
        let spot = self
            .spot
            .ok_or_else(|| EngineError::InvalidInput("spot is required".to_string()))?;
        let atm = self
            .atm
            .ok_or_else(|| EngineError::InvalidInput("atm quote is required".to_string()))?;
        let expiry = self
            .expiry
            .ok_or_else(|| EngineError::InvalidInput("expiry is required".to_string()))?;
        let mode = self.mode.unwrap_or(PricingMode::SpotBased);

        validate_observables(spot, self.future, &atm, mode)?;

        Ok(ChainContext {
            spot,
            future: self.future,
            atm,
            expiry,
            day_count: self.day_count.unwrap_or(DayCount::CalendarDays),
            calendar: self.calendar.unwrap_or_else(TradingCalendar::nse),
            mode,
            clock: self.clock.unwrap_or(ValuationClock::Live),
        })
    }
}

/// Evaluation context for one underlying and expiry.
///
/// Chain-level observables (spot, future, ATM quote) re-bind in place via
/// [`ChainContext::update`]; convention choices (day count, calendar, mode,
/// clock) are fixed for the context lifetime.
#[derive(Debug, Clone)]
pub struct ChainContext {
    spot: f64,
    future: Option<f64>,
    atm: AtmQuote,
    expiry: NaiveDate,
    day_count: DayCount,
    calendar: TradingCalendar,
    mode: PricingMode,
    clock: ValuationClock,
}

impl ChainContext {
    /// Starts a builder.
    pub fn builder() -> ChainContextBuilder {
        ChainContextBuilder::default()
    }

    /// Underlying spot price currently bound.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Quoted future currently bound, if any.
    pub fn future(&self) -> Option<f64> {
        self.future
    }

    /// ATM quote currently bound.
    pub fn atm(&self) -> &AtmQuote {
        &self.atm
    }

    /// Forward used for pricing: the quoted future when present, otherwise
    /// the put-call-parity forward implied by the ATM pair.
    pub fn implied_forward(&self) -> f64 {
        self.future.unwrap_or_else(|| self.atm.parity_forward())
    }

    /// Reference price the active convention prices against: the spot for
    /// [`PricingMode::SpotBased`], the forward otherwise.
    pub fn reference_price(&self) -> f64 {
        if self.mode.uses_spot() {
            self.spot
        } else {
            self.implied_forward()
        }
    }

    /// Re-binds the chain-level observables in place.
    ///
    /// Validation matches the builder; on error the context is unchanged.
    pub fn update(
        &mut self,
        spot: f64,
        future: Option<f64>,
        atm: AtmQuote,
    ) -> Result<(), EngineError> {
        validate_observables(spot, future, &atm, self.mode)?;
        self.spot = spot;
        self.future = future;
        self.atm = atm;
        Ok(())
    }

    /// Evaluates one strike as of the context clock.
    ///
    /// Returns `Ok(None)` when the strike has no usable quote on either side
    /// (or a degenerate strike value); `EngineError::Expired` when the
    /// valuation instant is at or past the expiry close.
    pub fn evaluate(&self, quote: &StrikeQuote) -> Result<Option<StrikeAnalytics>, EngineError> {
        self.evaluate_at(self.clock.instant(), quote)
    }

    /// Evaluates one strike as of an explicit valuation instant.
    pub fn evaluate_at(
        &self,
        valuation: NaiveDateTime,
        quote: &StrikeQuote,
    ) -> Result<Option<StrikeAnalytics>, EngineError> {
        let t = self.year_fraction_at(valuation)?;
        Ok(self.evaluate_with_t(t, quote))
    }

    /// Evaluates a batch of strikes as of the context clock. The valuation
    /// instant is snapshotted once for the whole batch; strikes without a
    /// usable quote come back as `None` without affecting their neighbors.
    pub fn evaluate_chain(
        &self,
        quotes: &[StrikeQuote],
    ) -> Result<Vec<Option<StrikeAnalytics>>, EngineError> {
        self.evaluate_chain_at(self.clock.instant(), quotes)
    }

    /// Batch evaluation as of an explicit valuation instant.
    pub fn evaluate_chain_at(
        &self,
        valuation: NaiveDateTime,
        quotes: &[StrikeQuote],
    ) -> Result<Vec<Option<StrikeAnalytics>>, EngineError> {
        let t = self.year_fraction_at(valuation)?;
        Ok(quotes.iter().map(|q| self.evaluate_with_t(t, q)).collect())
    }

    /// Rayon-parallel batch evaluation as of the context clock.
    #[cfg(feature = "parallel")]
    pub fn par_evaluate_chain(
        &self,
        quotes: &[StrikeQuote],
    ) -> Result<Vec<Option<StrikeAnalytics>>, EngineError> {
        let t = self.year_fraction_at(self.clock.instant())?;
        Ok(quotes
            .par_iter()
            .map(|q| self.evaluate_with_t(t, q))
            .collect())
    }

    fn year_fraction_at(&self, valuation: NaiveDateTime) -> Result<f64, EngineError> {
        let t = time_to_expiry(valuation, self.expiry, self.day_count, &self.calendar);
        if t <= 0.0 {
            return Err(EngineError::Expired(format!(
                "valuation {valuation} is at or past the 15:30 close of {}",
                self.expiry
            )));
        }
        Ok(t)
    }

    fn evaluate_with_t(&self, t: f64, quote: &StrikeQuote) -> Option<StrikeAnalytics> {
        let strike = quote.strike;
        if !strike.is_finite() || strike <= 0.0 {
            return None;
        }
        let call_premium = quote.usable_call();
        let put_premium = quote.usable_put();
        if call_premium.is_none() && put_premium.is_none() {
            return None;
        }

        let s = self.reference_price();
        let r = self.mode.risk_free_rate();
        let model = self.mode.model();

        let solve = |option_type: OptionType, premium: f64| {
            implied_vol(premium, |sigma| {
                model.price(option_type, s, strike, r, sigma, t)
            })
        };
        let call_iv = call_premium.map(|p| solve(OptionType::Call, p));
        let put_iv = put_premium.map(|p| solve(OptionType::Put, p));

        // Strikes below ATM report the put side, at/above the call side;
        // fall back to whichever side actually traded.
        let (chosen, other) = if strike < self.atm.strike {
            (put_iv, call_iv)
        } else {
            (call_iv, put_iv)
        };
        let iv = chosen.or(other)?;

        let call_delta = pricing::delta(model, OptionType::Call, s, strike, r, iv, t);
        let put_delta = pricing::delta(model, OptionType::Put, s, strike, r, iv, t);
        let gamma = pricing::gamma(model, s, strike, r, iv, t);
        let vega = pricing::vega(model, s, strike, r, iv, t);
        let theta = pricing::theta(model, OptionType::Put, s, strike, r, iv, t);
        let rho_call = pricing::rho(
            model,
            OptionType::Call,
            s,
            strike,
            r,
            call_iv.unwrap_or(iv),
            t,
        );
        let rho_put = pricing::rho(
            model,
            OptionType::Put,
            s,
            strike,
            r,
            put_iv.unwrap_or(iv),
            t,
        );

        Some(StrikeAnalytics {
            strike,
            impl_vol: round_dp(iv * 100.0, 2),
            call_iv: call_iv.map(|v| round_dp(v * 100.0, 2)),
            put_iv: put_iv.map(|v| round_dp(v * 100.0, 2)),
            call_delta: round_dp(call_delta, 2),
            put_delta: round_dp(put_delta, 2),
            theta: round_dp(theta / 365.0, 2),
            vega: round_dp(vega / 100.0, 2),
            gamma: round_dp(gamma, 4),
            rho_call: round_dp(rho_call / 1000.0, 3),
            rho_put: round_dp(rho_put / 1000.0, 3),
        })
    }
}

fn validate_observables(
    spot: f64,
    future: Option<f64>,
    atm: &AtmQuote,
    mode: PricingMode,
) -> Result<(), EngineError> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(EngineError::InvalidInput(
            "spot must be positive and finite".to_string(),
        ));
    }
    if !atm.strike.is_finite() || atm.strike <= 0.0 {
        return Err(EngineError::InvalidInput(
            "atm strike must be positive and finite".to_string(),
        ));
    }
    for (name, premium) in [
        ("atm call premium", atm.call_premium),
        ("atm put premium", atm.put_premium),
    ] {
        if !premium.is_finite() || premium < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "{name} must be non-negative and finite"
            )));
        }
    }
    if let Some(f) = future {
        if !f.is_finite() || f <= 0.0 {
            return Err(EngineError::InvalidInput(
                "future must be positive and finite when quoted".to_string(),
            ));
        }
    }
    if let PricingMode::CustomRate(rate) = mode {
        if !rate.is_finite() || rate < 0.0 {
            return Err(EngineError::InvalidInput(
                "custom rate must be non-negative and finite".to_string(),
            ));
        }
    }
    if !mode.uses_spot() {
        let forward = future.unwrap_or_else(|| atm.parity_forward());
        if forward <= 0.0 {
            return Err(EngineError::InvalidInput(
                "implied forward is not positive; check the atm quote".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::find_atm_strike;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at_close(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(15, 30, 0).expect("valid time")
    }

    /// Reference chain: spot 25000, ATM 25000 at 150/145 (parity forward
    /// 25005), weekly expiry exactly seven calendar days out.
    fn reference_context(mode: PricingMode) -> ChainContext {
        ChainContext::builder()
            .spot(25_000.0)
            .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
            .expiry(date(2026, 8, 27))
            .day_count(DayCount::CalendarDays)
            .calendar(TradingCalendar::nse())
            .mode(mode)
            .clock(ValuationClock::Fixed(at_close(2026, 8, 20)))
            .build()
            .expect("valid context")
    }

    #[test]
    fn builder_requires_the_core_observables() {
        let missing_spot = ChainContext::builder()
            .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
            .expiry(date(2026, 8, 27))
            .build();
        assert!(matches!(missing_spot, Err(EngineError::InvalidInput(_))));

        let missing_atm = ChainContext::builder()
            .spot(25_000.0)
            .expiry(date(2026, 8, 27))
            .build();
        assert!(matches!(missing_atm, Err(EngineError::InvalidInput(_))));

        let missing_expiry = ChainContext::builder()
            .spot(25_000.0)
            .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
            .build();
        assert!(matches!(missing_expiry, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn builder_rejects_degenerate_observables() {
        let base = || {
            ChainContext::builder()
                .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
                .expiry(date(2026, 8, 27))
        };
        assert!(base().spot(-1.0).build().is_err());
        assert!(base().spot(f64::NAN).build().is_err());
        assert!(base().spot(25_000.0).future(0.0).build().is_err());
        assert!(
            base()
                .spot(25_000.0)
                .mode(PricingMode::CustomRate(f64::NAN))
                .build()
                .is_err()
        );
        assert!(
            base()
                .spot(25_000.0)
                .atm(AtmQuote::new(25_000.0, -150.0, 145.0))
                .build()
                .is_err()
        );
        // A parity forward below zero only matters for the forward modes.
        let upside_down = AtmQuote::new(25_000.0, 1.0, 26_000.0);
        assert!(
            base()
                .spot(25_000.0)
                .atm(upside_down)
                .mode(PricingMode::ZeroRate)
                .build()
                .is_err()
        );
        assert!(
            base()
                .spot(25_000.0)
                .atm(upside_down)
                .mode(PricingMode::SpotBased)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn reference_strike_matches_the_verified_record() {
        let ctx = reference_context(PricingMode::ZeroRate);
        let row = ctx
            .evaluate(&StrikeQuote::both(25_100.0, 110.0, 205.0))
            .expect("not expired")
            .expect("usable quote");

        assert_eq!(row.strike, 25_100.0);
        assert_eq!(row.impl_vol, 11.04);
        assert_eq!(row.call_iv, Some(11.04));
        assert_eq!(row.put_iv, Some(11.04));
        assert_eq!(row.call_delta, 0.41);
        assert_eq!(row.put_delta, -0.59);
        assert_eq!(row.theta, -10.59);
        assert_eq!(row.vega, 13.42);
        assert_eq!(row.gamma, 0.001);
        assert_eq!(row.rho_call, 0.192);
        assert_eq!(row.rho_put, -0.289);
    }

    #[test]
    fn parity_forward_equalizes_the_atm_side_ivs() {
        let ctx = reference_context(PricingMode::ZeroRate);
        assert_relative_eq!(ctx.implied_forward(), 25_005.0, epsilon = 1e-12);

        let row = ctx
            .evaluate(&StrikeQuote::both(25_000.0, 150.0, 145.0))
            .expect("not expired")
            .expect("usable quote");
        assert_eq!(row.call_iv, Some(10.68));
        assert_eq!(row.put_iv, Some(10.68));
        // At the ATM strike the call side is representative.
        assert_eq!(row.impl_vol, 10.68);
    }

    #[test]
    fn quoted_future_takes_precedence_over_parity() {
        let mut ctx = reference_context(PricingMode::ZeroRate);
        ctx.update(25_000.0, Some(25_080.0), AtmQuote::new(25_000.0, 150.0, 145.0))
            .expect("valid update");
        assert_eq!(ctx.implied_forward(), 25_080.0);
        assert_eq!(ctx.reference_price(), 25_080.0);
    }

    #[test]
    fn spot_based_mode_prices_off_the_spot() {
        let ctx = reference_context(PricingMode::SpotBased);
        assert_eq!(ctx.reference_price(), 25_000.0);

        let row = ctx
            .evaluate(&StrikeQuote::call_only(25_100.0, 110.0))
            .expect("not expired")
            .expect("usable quote");
        assert!(row.impl_vol > 5.0 && row.impl_vol < 25.0);
        assert_eq!(row.put_iv, None);
    }

    #[test]
    fn moneyness_picks_the_put_side_below_atm() {
        let ctx = reference_context(PricingMode::ZeroRate);
        // Premiums deliberately inconsistent so the two sides disagree.
        let f = 25_005.0;
        let t = 7.0 / 365.0;
        let call_px =
            crate::pricing::PricingModel::Black76.price(OptionType::Call, f, 24_900.0, 0.0, 0.15, t);
        let put_px =
            crate::pricing::PricingModel::Black76.price(OptionType::Put, f, 24_900.0, 0.0, 0.25, t);

        let row = ctx
            .evaluate(&StrikeQuote::both(24_900.0, call_px, put_px))
            .expect("not expired")
            .expect("usable quote");
        assert_eq!(row.impl_vol, 25.0);
        assert_eq!(row.call_iv, Some(15.0));
        assert_eq!(row.put_iv, Some(25.0));
    }

    #[test]
    fn missing_side_falls_back_to_the_other() {
        let ctx = reference_context(PricingMode::ZeroRate);
        // Below ATM the put side is preferred, but only the call traded.
        let f = 25_005.0;
        let t = 7.0 / 365.0;
        let call_px =
            crate::pricing::PricingModel::Black76.price(OptionType::Call, f, 24_900.0, 0.0, 0.15, t);

        let row = ctx
            .evaluate(&StrikeQuote::call_only(24_900.0, call_px))
            .expect("not expired")
            .expect("usable quote");
        assert_eq!(row.impl_vol, 15.0);
        assert_eq!(row.put_iv, None);
    }

    #[test]
    fn dead_strikes_skip_without_error() {
        let ctx = reference_context(PricingMode::ZeroRate);
        assert_eq!(ctx.evaluate(&StrikeQuote::new(25_200.0, None, None)), Ok(None));
        assert_eq!(
            ctx.evaluate(&StrikeQuote::both(25_200.0, 0.0, 0.0)),
            Ok(None)
        );
        assert_eq!(
            ctx.evaluate(&StrikeQuote::both(f64::NAN, 110.0, 205.0)),
            Ok(None)
        );
    }

    #[test]
    fn batch_isolates_dead_strikes() {
        let ctx = reference_context(PricingMode::ZeroRate);
        let quotes = [
            StrikeQuote::both(25_000.0, 150.0, 145.0),
            StrikeQuote::both(25_050.0, 0.0, 0.0),
            StrikeQuote::both(25_100.0, 110.0, 205.0),
        ];
        let rows = ctx.evaluate_chain(&quotes).expect("not expired");
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_some());
        assert!(rows[1].is_none());
        assert_eq!(rows[2].expect("usable").impl_vol, 11.04);
    }

    #[test]
    fn expired_context_is_an_error() {
        let expired = ChainContext::builder()
            .spot(25_000.0)
            .atm(AtmQuote::new(25_000.0, 150.0, 145.0))
            .expiry(date(2026, 8, 27))
            .mode(PricingMode::ZeroRate)
            .clock(ValuationClock::Fixed(at_close(2026, 8, 27)))
            .build()
            .expect("valid context");

        let quote = StrikeQuote::both(25_100.0, 110.0, 205.0);
        assert!(matches!(
            expired.evaluate(&quote),
            Err(EngineError::Expired(_))
        ));
        assert!(matches!(
            expired.evaluate_chain(std::slice::from_ref(&quote)),
            Err(EngineError::Expired(_))
        ));
    }

    #[test]
    fn update_rejects_bad_observables_and_keeps_state() {
        let mut ctx = reference_context(PricingMode::ZeroRate);
        let err = ctx.update(-5.0, None, AtmQuote::new(25_000.0, 150.0, 145.0));
        assert!(err.is_err());
        assert_eq!(ctx.spot(), 25_000.0);
        assert_eq!(ctx.future(), None);

        ctx.update(25_050.0, None, AtmQuote::new(25_050.0, 148.0, 150.0))
            .expect("valid update");
        assert_eq!(ctx.spot(), 25_050.0);
        assert_eq!(ctx.atm().strike, 25_050.0);
        assert_relative_eq!(ctx.implied_forward(), 25_048.0, epsilon = 1e-12);
    }

    #[test]
    fn explicit_instant_matches_a_fixed_clock() {
        let fixed = reference_context(PricingMode::ZeroRate);
        let quote = StrikeQuote::both(25_100.0, 110.0, 205.0);
        let via_clock = fixed.evaluate(&quote).expect("not expired");
        let via_instant = fixed
            .evaluate_at(at_close(2026, 8, 20), &quote)
            .expect("not expired");
        assert_eq!(via_clock, via_instant);
    }

    #[test]
    fn sentinel_iv_rows_report_zero_gamma() {
        let ctx = reference_context(PricingMode::ZeroRate);
        // Deep ITM call quoted below intrinsic: inversion fails to the floor.
        let row = ctx
            .evaluate(&StrikeQuote::call_only(24_000.0, 900.0))
            .expect("not expired")
            .expect("row still emitted");
        assert_eq!(row.impl_vol, 0.0);
        assert_eq!(row.gamma, 0.0);
        assert_eq!(row.vega, 0.0);
        // The floor collapses d1 to +inf for this ITM strike.
        assert_eq!(row.call_delta, 1.0);
        assert_eq!(row.put_delta, 0.0);
    }

    #[test]
    fn atm_strike_helper_feeds_the_builder() {
        let strikes = [24_800.0, 24_900.0, 25_000.0, 25_100.0, 25_200.0];
        let atm = find_atm_strike(&strikes, 25_031.0).expect("non-empty");
        assert_eq!(atm, 25_000.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_batch_matches_sequential() {
        let ctx = reference_context(PricingMode::ZeroRate);
        let quotes: Vec<StrikeQuote> = (0..40)
            .map(|i| StrikeQuote::both(24_000.0 + 50.0 * f64::from(i), 110.0, 205.0))
            .collect();
        let seq = ctx.evaluate_chain(&quotes).expect("not expired");
        let par = ctx.par_evaluate_chain(&quotes).expect("not expired");
        assert_eq!(seq, par);
    }
}
