//! Module `chain`.
//!
//! Option-chain analytics: bind a context per underlying and expiry, feed it
//! per-strike premiums, and get back implied vols and Greeks scaled for
//! display. This is the layer a screen or a batch job talks to; the pricing
//! and root-finding kernels live below it in [`crate::pricing`] and
//! [`crate::vol`].
//!
//! Key types and purpose: [`PricingMode`] selects the reference price, rate,
//! and model family as one unit; [`ChainContext`] holds the chain-level
//! observables and evaluates strikes; [`StrikeQuote`]/[`StrikeAnalytics`]
//! are the per-strike input and output records.
//!
//! When to use: anything that consumes whole chains. For one-off pricing or
//! a single inversion, call [`crate::pricing`] and [`crate::vol`] directly.

pub mod context;
pub mod quotes;

pub use context::{ChainContext, ChainContextBuilder};
pub use quotes::{AtmQuote, StrikeAnalytics, StrikeQuote};

/// Rate applied under [`PricingMode::SpotBased`].
pub const SPOT_BASED_RATE: f64 = 0.10;

/// Rate applied under [`PricingMode::CustomRate`] when the caller supplies
/// none.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.06;

/// Pricing convention for a chain. Each variant fixes the reference price,
/// the risk-free rate, and the model family together, so a context cannot
/// mix (say) a spot reference with a forward-model drift.
///
/// | Variant      | Reference price | Rate  | Model          |
/// |--------------|-----------------|-------|----------------|
/// | `SpotBased`  | spot            | 10%   | Black-Scholes  |
/// | `CustomRate` | future/forward  | given | Black-76       |
/// | `ZeroRate`   | future/forward  | 0%    | Black-76       |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingMode {
    /// Price against the underlying spot at a fixed 10% rate.
    SpotBased,
    /// Price against the forward at a caller-supplied rate.
    CustomRate(f64),
    /// Price against the forward with the rate pinned to zero, so the
    /// discount factor drops out entirely.
    ZeroRate,
}

impl PricingMode {
    /// `CustomRate` with the caller's rate, or the 6% default when the feed
    /// did not carry one.
    pub fn custom_or_default(rate: Option<f64>) -> Self {
        Self::CustomRate(rate.unwrap_or(DEFAULT_RISK_FREE_RATE))
    }

    /// Risk-free rate this convention prices with.
    pub fn risk_free_rate(&self) -> f64 {
        match self {
            Self::SpotBased => SPOT_BASED_RATE,
            Self::CustomRate(rate) => *rate,
            Self::ZeroRate => 0.0,
        }
    }

    /// Model family this convention prices with.
    pub fn model(&self) -> crate::pricing::PricingModel {
        match self {
            Self::SpotBased => crate::pricing::PricingModel::BlackScholes,
            Self::CustomRate(_) | Self::ZeroRate => crate::pricing::PricingModel::Black76,
        }
    }

    /// Whether the reference price is the spot (as opposed to the forward).
    pub fn uses_spot(&self) -> bool {
        matches!(self, Self::SpotBased)
    }
}

/// Picks the listed strike closest to a reference price.
///
/// Non-finite entries are ignored; ties keep the first of the pair, so with
/// an ascending ladder the lower strike wins. Returns `None` when nothing
/// usable is listed.
///
/// # Examples
/// ```
/// use chainvol::chain::find_atm_strike;
///
/// let strikes = [24_900.0, 25_000.0, 25_100.0];
/// assert_eq!(find_atm_strike(&strikes, 25_031.0), Some(25_000.0));
/// assert_eq!(find_atm_strike(&[], 25_031.0), None);
/// ```
pub fn find_atm_strike(strikes: &[f64], reference: f64) -> Option<f64> {
    if !reference.is_finite() {
        return None;
    }
    strikes
        .iter()
        .copied()
        .filter(|k| k.is_finite())
        .min_by(|a, b| {
            (a - reference)
                .abs()
                .partial_cmp(&(b - reference).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
