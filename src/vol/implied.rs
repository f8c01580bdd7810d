//! Module `vol::implied`.
//!
//! Premium-to-volatility inversion by Brent's method with a sentinel policy:
//! a quote the model cannot reach never raises, it reports the floor.
//!
//! Numerical considerations: the bracket [0.001, 5.0] with xtol 1e-12 and a
//! 100-iteration budget matches the conventional scipy `brentq` setup. The
//! objective uses the same CDF approximation as the pricing kernels, so a
//! round trip recovers sigma to solver tolerance, not approximation error.

use crate::core::IV_FLOOR;
use crate::math::brent;

/// Lower bracket edge for the volatility search.
pub const IV_MIN: f64 = 0.001;
/// Upper bracket edge for the volatility search.
pub const IV_MAX: f64 = 5.0;
/// Absolute convergence tolerance on sigma.
pub const IV_TOL: f64 = 1e-12;
/// Iteration budget for one inversion.
pub const IV_MAX_ITER: usize = 100;

/// Solves for the volatility at which `price(sigma)` matches `observed`.
///
/// Parameters:
/// - `observed`: traded premium in currency units.
/// - `price`: closure pricing the same contract at a candidate sigma.
///
/// Returns the sentinel [`IV_FLOOR`](crate::core::IV_FLOOR) when the observed
/// premium is not positive, the bracket does not straddle the quote (below
/// intrinsic or above the bracket-top price), or the iteration budget runs
/// out. The sentinel is strictly positive and inversion never raises; callers
/// test for it with [`is_unavailable`].
///
/// # Examples
/// ```
/// use chainvol::core::OptionType;
/// use chainvol::pricing::PricingModel;
/// use chainvol::vol::implied_vol;
///
/// let t = 7.0 / 365.0;
/// let quote = PricingModel::Black76.price(OptionType::Call, 25005.0, 25100.0, 0.0, 0.11, t);
/// let iv = implied_vol(quote, |s| {
///     PricingModel::Black76.price(OptionType::Call, 25005.0, 25100.0, 0.0, s, t)
/// });
/// assert!((iv - 0.11).abs() < 1.0e-9);
/// ```
pub fn implied_vol<F>(observed: f64, price: F) -> f64
where
    F: Fn(f64) -> f64,
{
    if !observed.is_finite() || observed <= 0.0 {
        return IV_FLOOR;
    }
    match brent(
        |sigma| observed - price(sigma),
        IV_MIN,
        IV_MAX,
        IV_TOL,
        IV_MAX_ITER,
    ) {
        Ok(iv) if iv > IV_FLOOR => iv,
        _ => IV_FLOOR,
    }
}

/// True when `iv` is the sentinel produced by a failed inversion.
pub fn is_unavailable(iv: f64) -> bool {
    iv <= IV_FLOOR
}
