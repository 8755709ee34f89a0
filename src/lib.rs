//! Distance from a point to a decision boundary.
//!
//! `dbdist` measures how far a query point sits from a curve `y = f(x)` drawn
//! inside a rectangular domain:
//!
//! - **Nearest point**: [`BoundaryDistanceSolver::solve`] runs a bounded
//!   one-dimensional minimization over `x` to find the closest boundary point.
//! - **Normalization**: [`BoundaryDistanceSolver::compute_normalization`]
//!   sweeps the rectangle's perimeter and reports the query distance as a
//!   fraction of the worst-case edge distance.
//!
//! # Clamping
//!
//! The boundary is evaluated first and clamped into the y-range of the bounds
//! second. A curve that leaves the rectangle is treated as running along the
//! top or bottom edge for that stretch.
//!
//! # Example
//!
//! ```rust
//! use dbdist::{curves, BoundaryDistanceSolver, Point, RectBounds};
//!
//! let bounds = RectBounds::from_ranges((0.0, 1.0), (0.0, 1.0)).unwrap();
//! let solver = BoundaryDistanceSolver::new(curves::flat, bounds).normalized(true);
//!
//! let p = Point::new(0.1, 0.1).unwrap();
//! let result = solver.execute(&p).unwrap();
//!
//! assert_eq!(result.closest_point.x(), 0.1);
//! assert_eq!(result.closest_point.y(), 0.8);
//! assert_eq!(result.distance, 0.7);
//!
//! let norm = result.normalization.unwrap();
//! assert_eq!(norm.proportion, 0.875);
//! ```
//!
//! # Precision
//!
//! Everything is computed in full `f64` precision. Only reported values are
//! rounded, to [`ROUND_DECIMALS`] places.
//!
//! # References
//!
//! - Brent, R.P. (1973). "Algorithms for Minimization without Derivatives", ch. 5
//! - Forsythe, Malcolm & Moler (1977). "Computer Methods for Mathematical
//!   Computations" (FMIN)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
mod error;
pub mod geometry;
pub mod minimize;
mod solver;

pub use boundary::{curves, fallible, BoundaryError, BoundaryFunction, Fallible};
pub use error::{Error, Result};
pub use geometry::{Axis, AxisBounds, Edge, Point, RectBounds};
pub use minimize::{minimize_bounded, MinimizeOptions, MinimizeResult};
pub use solver::{
    BoundaryDistanceSolver, DistanceResult, Nearest, NormalizationResult, SolverOptions,
    SweepPolicy,
};

/// Decimal places kept in every reported value.
pub const ROUND_DECIMALS: u32 = 5;

/// Samples taken along each rectangle edge during normalization.
pub const DEFAULT_EDGE_SAMPLES: usize = 50;

/// Default absolute x-tolerance for the bounded minimizer.
///
/// Well below the reporting precision so that kinks in the distance
/// objective (a query point lying on the curve) still round to the exact
/// answer.
pub const DEFAULT_X_TOLERANCE: f64 = 1e-8;

/// Round `value` to `decimals` decimal places, half away from zero.
///
/// Non-finite values pass through unchanged, as do values too large to
/// carry any fractional digits at this precision.
///
/// ```rust
/// assert_eq!(dbdist::round_to(0.353553, 5), 0.35355);
/// assert_eq!(dbdist::round_to(-1.234567, 2), -1.23);
/// ```
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    // beyond 2^52 every f64 is already an integer
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / scale
}
