//! Module `pricing::black`.
//!
//! Closed-form pricing for European options: Black-Scholes on a spot
//! reference and Black-76 on a forward, sharing one d1/d2 layer and one set
//! of Greek kernels.
//!
//! References: Hull (11th ed.) Ch. 13 and 19; Black (1976) for the forward
//! form.
//!
//! Key types and purpose: `PricingModel` selects the model family; the free
//! functions `delta`/`gamma`/`vega`/`theta`/`rho` are the raw sensitivities
//! bundled by `greeks`.
//!
//! Numerical considerations: a volatility at or below the solver floor
//! collapses `d1` to +/- infinity depending on moneyness, which drives every
//! kernel to its degenerate limit through the CDF (prices to intrinsic,
//! gamma explicitly to zero). Greeks are spot-form sensitivities evaluated on
//! the active model's d1/d2 and carry no presentation scaling.

use crate::core::{Greeks, IV_FLOOR, OptionType};
use crate::math::{normal_cdf, normal_pdf};

/// Closed-form model family for a chain's reference price.
///
/// `BlackScholes` prices off the spot with the rate in the drift; `Black76`
/// prices off a forward, so the rate enters only through discounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingModel {
    /// Spot underlying: d1 drift is `r + sigma^2 / 2`.
    BlackScholes,
    /// Forward underlying: d1 drift is `sigma^2 / 2` alone.
    Black76,
}

impl PricingModel {
    /// The d1 term for reference price `s`, strike `k`, rate `r`, volatility
    /// `sigma`, and year fraction `t`.
    ///
    /// Edge cases:
    /// - `sigma` at or below the solver floor, or `t <= 0`, collapses to
    ///   `+inf` when `s > k` and `-inf` otherwise.
    #[inline]
    pub fn d1(self, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
        if sigma <= IV_FLOOR || t <= 0.0 {
            return if s > k { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        let drift = match self {
            Self::BlackScholes => r + 0.5 * sigma * sigma,
            Self::Black76 => 0.5 * sigma * sigma,
        };
        ((s / k).ln() + drift * t) / (sigma * t.sqrt())
    }

    /// The d2 term: `d1 - sigma * sqrt(t)`.
    #[inline]
    pub fn d2(self, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
        let d1 = self.d1(s, k, r, sigma, t);
        if d1.is_infinite() {
            return d1;
        }
        d1 - sigma * t.sqrt()
    }

    /// Undiscounted exercise value at `s`.
    #[inline]
    pub fn intrinsic(option_type: OptionType, s: f64, k: f64) -> f64 {
        match option_type {
            OptionType::Call => (s - k).max(0.0),
            OptionType::Put => (k - s).max(0.0),
        }
    }

    /// European premium for reference price `s`, strike `k`, rate `r`,
    /// volatility `sigma`, and year fraction `t`.
    ///
    /// Edge cases:
    /// - `t <= 0` returns the undiscounted intrinsic value.
    /// - `sigma` at the solver floor degenerates to (discounted) intrinsic
    ///   through the d1/d2 limits.
    ///
    /// # Examples
    /// ```
    /// use chainvol::core::OptionType;
    /// use chainvol::pricing::PricingModel;
    ///
    /// let call = PricingModel::BlackScholes.price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
    /// assert!((call - 10.4506).abs() < 1.0e-3);
    ///
    /// let fwd = PricingModel::Black76.price(OptionType::Call, 25005.0, 25100.0, 0.0, 0.11, 7.0 / 365.0);
    /// assert!(fwd > 0.0 && fwd < 25005.0);
    /// ```
    #[inline]
    pub fn price(self, option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return Self::intrinsic(option_type, s, k);
        }
        let sign = option_type.sign();
        let d1 = self.d1(s, k, r, sigma, t);
        let d2 = self.d2(s, k, r, sigma, t);
        let df = (-r * t).exp();
        match self {
            Self::BlackScholes => {
                sign * (s * normal_cdf(sign * d1) - k * df * normal_cdf(sign * d2))
            }
            Self::Black76 => sign * df * (s * normal_cdf(sign * d1) - k * normal_cdf(sign * d2)),
        }
    }
}

/// First derivative to the reference price: `N(d1)` for calls, `N(d1) - 1`
/// for puts (forward delta under `Black76`).
#[inline]
pub fn delta(model: PricingModel, option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let nd1 = normal_cdf(model.d1(s, k, r, sigma, t));
    match option_type {
        OptionType::Call => nd1,
        OptionType::Put => nd1 - 1.0,
    }
}

/// Second derivative to the reference price. Exactly zero at the volatility
/// floor or at expiry.
#[inline]
pub fn gamma(model: PricingModel, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if sigma <= IV_FLOOR || t <= 0.0 {
        return 0.0;
    }
    normal_pdf(model.d1(s, k, r, sigma, t)) / (s * sigma * t.sqrt())
}

/// Sensitivity to volatility per unit sigma (not per percentage point).
#[inline]
pub fn vega(model: PricingModel, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    s * normal_pdf(model.d1(s, k, r, sigma, t)) * t.sqrt()
}

/// Annualized time decay (calendar-day reporting is the facade's concern).
#[inline]
pub fn theta(model: PricingModel, option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let sign = option_type.sign();
    let d1 = model.d1(s, k, r, sigma, t);
    let d2 = model.d2(s, k, r, sigma, t);
    -s * sigma * normal_pdf(d1) / (2.0 * t.sqrt())
        - sign * r * k * (-r * t).exp() * normal_cdf(sign * d2)
}

/// Sensitivity to the rate per unit rate (not per 0.1%).
#[inline]
pub fn rho(model: PricingModel, option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let sign = option_type.sign();
    let d2 = model.d2(s, k, r, sigma, t);
    sign * k * t * (-r * t).exp() * normal_cdf(sign * d2)
}

/// Bundles the raw Greek set at one point.
///
/// # Examples
/// ```
/// use chainvol::core::OptionType;
/// use chainvol::pricing::{PricingModel, greeks};
///
/// let g = greeks(PricingModel::BlackScholes, OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
/// assert!(g.delta > 0.0 && g.gamma > 0.0 && g.vega > 0.0 && g.theta < 0.0);
/// ```
pub fn greeks(model: PricingModel, option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> Greeks {
    Greeks {
        delta: delta(model, option_type, s, k, r, sigma, t),
        gamma: gamma(model, s, k, r, sigma, t),
        vega: vega(model, s, k, r, sigma, t),
        theta: theta(model, option_type, s, k, r, sigma, t),
        rho: rho(model, option_type, s, k, r, sigma, t),
    }
}
