//! Decision boundary functions.
//!
//! A boundary is any curve `y = f(x)`. Plain closures and function items
//! (`Fn(f64) -> f64`) work directly. A curve that can fail, e.g. one
//! backed by a lookup table with gaps, goes through [`fallible`] so the
//! failure reaches the caller as an [`Error::Evaluation`] instead of a
//! garbage value.
//!
//! A boundary returning NaN is also treated as a failed evaluation
//! ([`Error::UndefinedBoundary`]). Infinities are fine: they clamp to the
//! matching edge of the domain.
//!
//! ```rust
//! use dbdist::{fallible, BoundaryFunction};
//!
//! let line = |x: f64| 2.0 * x;
//! assert_eq!(line.evaluate(0.5).unwrap(), 1.0);
//!
//! let sqrt = fallible(|x: f64| {
//!     if x < 0.0 {
//!         Err(format!("sqrt of negative {x}"))
//!     } else {
//!         Ok(x.sqrt())
//!     }
//! });
//! assert!(sqrt.evaluate(-1.0).is_err());
//! ```

pub mod curves;

use crate::error::{Error, Result};
use crate::geometry::AxisBounds;

/// Failure reported by a boundary function.
pub type BoundaryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A curve `y = f(x)` that may fail for some inputs.
pub trait BoundaryFunction {
    /// Evaluate the curve at `x`.
    fn evaluate(&self, x: f64) -> std::result::Result<f64, BoundaryError>;
}

impl<F> BoundaryFunction for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn evaluate(&self, x: f64) -> std::result::Result<f64, BoundaryError> {
        Ok(self(x))
    }
}

/// Adapter turning a fallible closure into a [`BoundaryFunction`].
///
/// Built with [`fallible`].
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(F);

/// Wrap `f: Fn(f64) -> Result<f64, E>` as a boundary function.
#[inline]
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(f64) -> std::result::Result<f64, E>,
    E: Into<BoundaryError>,
{
    Fallible(f)
}

impl<F, E> BoundaryFunction for Fallible<F>
where
    F: Fn(f64) -> std::result::Result<f64, E>,
    E: Into<BoundaryError>,
{
    #[inline]
    fn evaluate(&self, x: f64) -> std::result::Result<f64, BoundaryError> {
        (self.0)(x).map_err(Into::into)
    }
}

/// Evaluate `boundary` at `x` and clamp the result into `y_range`.
///
/// The clamp is applied to the output only; `x` is passed through as is.
pub(crate) fn evaluate_clamped<B>(boundary: &B, x: f64, y_range: &AxisBounds) -> Result<f64>
where
    B: BoundaryFunction + ?Sized,
{
    let y = match boundary.evaluate(x) {
        Ok(y) => y,
        Err(source) => {
            log::warn!("decision boundary could not be evaluated at x = {x}: {source}");
            return Err(Error::Evaluation { x, source });
        }
    };
    if y.is_nan() {
        log::warn!("decision boundary returned NaN at x = {x}");
        return Err(Error::UndefinedBoundary { x });
    }
    Ok(y_range.clamp(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> AxisBounds {
        AxisBounds::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_closure_boundary() {
        let f = |x: f64| x * x;
        assert_eq!(f.evaluate(3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_fn_item_boundary() {
        assert_eq!(curves::diagonal.evaluate(0.3).unwrap(), 0.3);
    }

    #[test]
    fn test_clamps_output_not_input() {
        // x = 2.0 lies outside the unit square; the boundary still sees it.
        let f = |x: f64| x - 1.5;
        assert_eq!(evaluate_clamped(&f, 2.0, &unit()).unwrap(), 0.5);
        assert_eq!(evaluate_clamped(&f, 0.0, &unit()).unwrap(), 0.0);
        assert_eq!(evaluate_clamped(&f, 3.0, &unit()).unwrap(), 1.0);
    }

    #[test]
    fn test_infinity_clamps() {
        let f = |x: f64| x.ln();
        assert_eq!(evaluate_clamped(&f, 0.0, &unit()).unwrap(), 0.0);
    }

    #[test]
    fn test_nan_is_undefined() {
        let f = |x: f64| (x - 2.0).sqrt();
        let err = evaluate_clamped(&f, 0.5, &unit()).unwrap_err();
        assert!(matches!(err, Error::UndefinedBoundary { x } if x == 0.5));
    }

    #[test]
    fn test_fallible_failure_is_propagated() {
        let f = fallible(|x: f64| {
            if x > 0.5 {
                Err("out of table range")
            } else {
                Ok(x)
            }
        });
        assert_eq!(evaluate_clamped(&f, 0.25, &unit()).unwrap(), 0.25);

        let err = evaluate_clamped(&f, 0.75, &unit()).unwrap_err();
        assert!(err.is_evaluation_failure());
        assert_eq!(err.failed_at(), Some(0.75));
    }
}
