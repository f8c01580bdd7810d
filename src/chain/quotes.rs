//! Module `chain::quotes`.
//!
//! Input and output records for chain evaluation. These are the crate's
//! serialization boundary: `StrikeAnalytics` is shaped (and named, via
//! serde) as the columns appended to a chain table downstream.

use serde::{Deserialize, Serialize};

/// At-the-money observables for one chain snapshot. All fields are required;
/// the pair implies a forward by put-call parity when no future is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmQuote {
    /// Strike closest to the underlying reference price.
    pub strike: f64,
    /// Traded call premium at the ATM strike.
    pub call_premium: f64,
    /// Traded put premium at the ATM strike.
    pub put_premium: f64,
}

impl AtmQuote {
    pub fn new(strike: f64, call_premium: f64, put_premium: f64) -> Self {
        Self {
            strike,
            call_premium,
            put_premium,
        }
    }

    /// Put-call-parity forward implied by the ATM pair:
    /// `call - put + strike`.
    pub fn parity_forward(&self) -> f64 {
        self.call_premium - self.put_premium + self.strike
    }
}

/// One strike's observed premiums. Either side may be absent: a missing or
/// non-positive premium means there is no usable quote on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeQuote {
    pub strike: f64,
    pub call_premium: Option<f64>,
    pub put_premium: Option<f64>,
}

impl StrikeQuote {
    pub fn new(strike: f64, call_premium: Option<f64>, put_premium: Option<f64>) -> Self {
        Self {
            strike,
            call_premium,
            put_premium,
        }
    }

    /// Quote with both sides present.
    pub fn both(strike: f64, call_premium: f64, put_premium: f64) -> Self {
        Self::new(strike, Some(call_premium), Some(put_premium))
    }

    /// Quote with only the call side.
    pub fn call_only(strike: f64, premium: f64) -> Self {
        Self::new(strike, Some(premium), None)
    }

    /// Quote with only the put side.
    pub fn put_only(strike: f64, premium: f64) -> Self {
        Self::new(strike, None, Some(premium))
    }

    /// Call premium when present, finite, and positive.
    pub fn usable_call(&self) -> Option<f64> {
        usable(self.call_premium)
    }

    /// Put premium when present, finite, and positive.
    pub fn usable_put(&self) -> Option<f64> {
        usable(self.put_premium)
    }
}

fn usable(premium: Option<f64>) -> Option<f64> {
    premium.filter(|p| p.is_finite() && *p > 0.0)
}

/// Per-strike analytics row.
///
/// Values carry the exchange-style presentation scaling, applied here and
/// only here: implied volatilities in percent (2dp), deltas (2dp), theta as
/// put-form decay per calendar day (2dp), vega per volatility point (2dp),
/// gamma (4dp), rho per 0.1% rate move (3dp). The side IVs are populated
/// whenever that side's quote was solvable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StrikeAnalytics {
    pub strike: f64,
    /// Representative IV for the strike, chosen by moneyness.
    pub impl_vol: f64,
    #[serde(rename = "CallIV")]
    pub call_iv: Option<f64>,
    #[serde(rename = "PutIV")]
    pub put_iv: Option<f64>,
    pub call_delta: f64,
    pub put_delta: f64,
    pub theta: f64,
    pub vega: f64,
    pub gamma: f64,
    pub rho_call: f64,
    pub rho_put: f64,
}

/// Rounds to `digits` decimal places for the output boundary.
pub(crate) fn round_dp(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}
