//! Implied-volatility inversion.

pub mod implied;

pub use implied::{IV_MAX, IV_MAX_ITER, IV_MIN, IV_TOL, implied_vol, is_unavailable};
