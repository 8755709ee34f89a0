//! Sample decision boundaries over the unit square.
//!
//! | Curve | Formula |
//! |-------|---------|
//! | [`flat`] | `y = 0.8` |
//! | [`diagonal`] | `y = x` |
//! | [`diagonal_sine`] | `y = x + 0.08 sin(7πx)` |
//! | [`arch`] | `y = 0.75 - (x - 0.5)²` |

use std::f64::consts::PI;

/// Horizontal line at `y = 0.8`.
#[inline]
#[must_use]
pub fn flat(_x: f64) -> f64 {
    0.8
}

/// The diagonal `y = x`.
#[inline]
#[must_use]
pub fn diagonal(x: f64) -> f64 {
    x
}

/// The diagonal with a small sine ripple.
#[inline]
#[must_use]
pub fn diagonal_sine(x: f64) -> f64 {
    0.08 * (x * 7.0 * PI).sin() + x
}

/// Downward parabola peaking at `(0.5, 0.75)`.
#[inline]
#[must_use]
pub fn arch(x: f64) -> f64 {
    -(x - 0.5).powi(2) + 0.75
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_stay_in_unit_square() {
        for i in 0..=100 {
            let x = i as f64 / 100.0;
            for f in [flat, diagonal, diagonal_sine, arch] {
                let y = f(x);
                assert!(y.is_finite());
                assert!((-0.1..=1.1).contains(&y), "y = {y} at x = {x}");
            }
        }
    }

    #[test]
    fn test_arch_peak() {
        assert_eq!(arch(0.5), 0.75);
        assert_eq!(arch(0.0), arch(1.0));
    }
}
