pub mod brent;

pub use brent::brent;

#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    NonConvergence,
    NoSignChange,
    InvalidInput(&'static str),
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonConvergence => write!(f, "iteration budget exhausted"),
            Self::NoSignChange => write!(f, "bracket does not straddle a root"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for MathError {}

pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF via the Abramowitz & Stegun 7.1.26 rational
/// approximation (absolute error < 7.5e-8). Exact 0/1 at -/+ infinity.
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_53
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}
