//! Closed-form pricing kernels and raw Greeks.

pub mod black;

pub use black::{PricingModel, delta, gamma, greeks, rho, theta, vega};

pub use crate::core::types::OptionType;
