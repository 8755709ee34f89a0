//! Bounded scalar minimization.
//!
//! [`minimize_bounded`] is Brent's method restricted to a closed interval:
//! golden-section search, accelerated by successive parabolic
//! interpolation whenever the last few points make a parabola trustworthy.
//! It needs no derivatives, so it copes with the kinks a distance objective
//! has wherever the query point sits on the curve.
//!
//! # Interval handling
//!
//! The endpoints themselves are never evaluated. A minimum sitting on an
//! endpoint is approached to within the tolerance instead. A zero-width
//! interval short-circuits and returns its only point after one evaluation.
//!
//! # Convergence
//!
//! Iteration stops once the bracket around the best point is narrower than
//! `2 * tol`, where `tol = sqrt(eps) * |x| + x_tolerance / 3`. Hitting the
//! evaluation cap returns the best point seen with `converged == false`.
//!
//! # References
//!
//! - Brent, R.P. (1973). "Algorithms for Minimization without Derivatives"
//! - Forsythe, Malcolm & Moler (1977). FMIN

use crate::DEFAULT_X_TOLERANCE;

/// `(3 - sqrt(5)) / 2`, the golden-section fraction.
const GOLDEN: f64 = 0.381_966_011_250_105_1;

/// Options for [`minimize_bounded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    /// Absolute tolerance on the minimizing x.
    pub x_tolerance: f64,
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_evaluations: 500,
        }
    }
}

/// Outcome of a bounded minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeResult {
    /// Best abscissa found.
    pub x: f64,
    /// Objective value at `x`.
    pub f_min: f64,
    /// Number of objective evaluations used.
    pub evaluations: usize,
    /// `false` if the evaluation cap was hit before the tolerance was met.
    pub converged: bool,
}

#[inline]
fn sign_or_one(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Minimize `f` over `[lower, upper]`.
///
/// The objective is fallible: the first `Err` it returns stops the search
/// and is handed back unchanged.
///
/// # Example
///
/// ```rust
/// use dbdist::{minimize_bounded, MinimizeOptions};
///
/// let res = minimize_bounded(
///     |x| Ok::<_, ()>((x - 0.3) * (x - 0.3)),
///     0.0,
///     1.0,
///     &MinimizeOptions::default(),
/// )
/// .unwrap();
/// assert!((res.x - 0.3).abs() < 1e-7);
/// assert!(res.converged);
/// ```
pub fn minimize_bounded<F, E>(
    mut f: F,
    lower: f64,
    upper: f64,
    opts: &MinimizeOptions,
) -> Result<MinimizeResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    debug_assert!(lower <= upper, "inverted interval [{lower}, {upper}]");
    let sqrt_eps = f64::EPSILON.sqrt();

    let x_tolerance = if opts.x_tolerance.is_finite() && opts.x_tolerance >= 0.0 {
        opts.x_tolerance
    } else {
        log::warn!(
            "invalid x-tolerance {}, using {DEFAULT_X_TOLERANCE}",
            opts.x_tolerance
        );
        DEFAULT_X_TOLERANCE
    };

    let (mut a, mut b) = (lower, upper);

    // xf: best so far, nfc: second best, fulc: previous value of nfc
    let mut fulc = a + GOLDEN * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat = 0.0_f64;
    let mut e = 0.0_f64;

    let mut fx = f(xf)?;
    let mut evaluations = 1;
    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + x_tolerance / 3.0;
    let mut tol2 = 2.0 * tol1;
    let mut converged = true;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        if e.abs() > tol1 {
            // Try a parabola through (xf, fx), (nfc, fnfc), (fulc, ffulc).
            golden = false;
            let r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                // Keep away from the bracket ends.
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * sign_or_one(xm - xf);
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = GOLDEN * e;
        }

        let x = xf + sign_or_one(rat) * rat.abs().max(tol1);
        let fu = f(x)?;
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + x_tolerance / 3.0;
        tol2 = 2.0 * tol1;

        if evaluations >= opts.max_evaluations {
            converged = (xf - xm).abs() <= tol2 - 0.5 * (b - a);
            if !converged {
                log::warn!(
                    "bounded minimizer stopped after {evaluations} evaluations without \
                     meeting x-tolerance {x_tolerance}"
                );
            }
            break;
        }
    }

    Ok(MinimizeResult {
        x: xf,
        f_min: fx,
        evaluations,
        converged,
    })
}
