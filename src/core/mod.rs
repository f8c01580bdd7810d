//! Common domain types, the Greeks container, and library-wide errors.

pub mod types;

pub use types::*;

/// Lower bound for solved implied volatilities.
///
/// The IV solver returns this sentinel whenever inversion fails, and the
/// pricing kernels treat any sigma at or below it as the degenerate zero-vol
/// branch (`d1` collapses to +/- infinity, gamma to zero). Callers should read
/// a volatility at the floor as "IV unavailable", never as a real zero.
pub const IV_FLOOR: f64 = 1.0e-11;

/// Standardized Greeks container holding raw annualized sensitivities.
///
/// Values carry no presentation scaling; the chain facade applies the
/// exchange-style factors (vega per 1%, theta per calendar day, rho per 0.1%)
/// only when assembling output records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    /// First derivative to the underlying reference price.
    pub delta: f64,
    /// Second derivative to the underlying reference price.
    pub gamma: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// First derivative to time.
    pub theta: f64,
    /// First derivative to rate.
    pub rho: f64,
}

/// Errors surfaced by the chain facade and its validating builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Input validation error.
    InvalidInput(String),
    /// Valuation at or past the expiry close: time to expiry is not positive.
    Expired(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Expired(msg) => write!(f, "contract expired: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
