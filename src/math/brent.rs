//! Brent's root finder: bisection, secant, and inverse quadratic
//! interpolation combined so each step is at least as good as bisection.
//! See Brent (1973), Ch. 4.

use crate::math::MathError;

/// Finds a root of `f` in `[a, b]` to absolute tolerance `xtol`.
///
/// Parameters:
/// - `a`, `b`: bracket endpoints; `f(a)` and `f(b)` must differ in sign.
/// - `xtol`: absolute width at which the bracket is accepted as converged.
/// - `max_iter`: iteration budget before giving up.
///
/// Edge cases:
/// - A non-straddling bracket returns `MathError::NoSignChange`.
/// - Non-finite values of `f` at the endpoints return `MathError::InvalidInput`.
/// - An exhausted budget returns `MathError::NonConvergence`.
pub fn brent<F>(f: F, a: f64, b: f64, xtol: f64, max_iter: usize) -> Result<f64, MathError>
where
    F: Fn(f64) -> f64,
{
    if xtol <= 0.0 {
        return Err(MathError::InvalidInput("xtol must be positive"));
    }
    if max_iter == 0 {
        return Err(MathError::InvalidInput("max_iter must be > 0"));
    }

    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);
    if !fa.is_finite() || !fb.is_finite() {
        return Err(MathError::InvalidInput("f must be finite at the bracket"));
    }
    if fa * fb > 0.0 {
        return Err(MathError::NoSignChange);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..max_iter {
        if fb * fc > 0.0 {
            // Root no longer between b and c: reset the contrapoint.
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                // Secant step.
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                // Inverse quadratic interpolation.
                q = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                q = (q - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation acceptable.
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += if xm > 0.0 { tol1 } else { -tol1 };
        }
        fb = f(b);
        if fb.is_nan() {
            return Err(MathError::NonConvergence);
        }
    }

    Err(MathError::NonConvergence)
}
