//! Error type shared by construction, evaluation and the perimeter sweep.

use thiserror::Error;

use crate::boundary::BoundaryError;
use crate::geometry::Axis;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong building inputs or computing a distance.
#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------
    /// A point coordinate was NaN or infinite.
    #[error("{axis} coordinate must be a finite number, got {value}")]
    NonFiniteCoordinate {
        /// Which coordinate was rejected.
        axis: Axis,
        /// The offending value.
        value: f64,
    },

    /// An interval endpoint, or the interval width, was NaN or infinite.
    #[error("axis bounds must be finite, got [{lower}, {upper}]")]
    NonFiniteBounds {
        /// Supplied lower limit.
        lower: f64,
        /// Supplied upper limit.
        upper: f64,
    },

    /// The upper limit of an interval was below its lower limit.
    #[error("axis bounds are inverted: upper {upper} < lower {lower}")]
    InvertedBounds {
        /// Supplied lower limit.
        lower: f64,
        /// Supplied upper limit.
        upper: f64,
    },

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------
    /// The boundary function reported a failure.
    #[error("boundary function could not be evaluated at x = {x}")]
    Evaluation {
        /// Abscissa that was being evaluated.
        x: f64,
        /// Failure reported by the boundary function.
        #[source]
        source: BoundaryError,
    },

    /// The boundary function returned NaN.
    #[error("boundary function is undefined at x = {x} (returned NaN)")]
    UndefinedBoundary {
        /// Abscissa that was being evaluated.
        x: f64,
    },

    // ------------------------------------------------------------------
    // Normalization sweep
    // ------------------------------------------------------------------
    /// Edges need at least one sample each.
    #[error("edge sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    /// Every perimeter sample failed and was skipped.
    #[error("all {failed} perimeter samples failed to evaluate")]
    NoUsableSamples {
        /// Number of samples that were dropped.
        failed: usize,
    },
}

impl Error {
    /// True for errors raised while building a point or bounds.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteCoordinate { .. }
                | Self::NonFiniteBounds { .. }
                | Self::InvertedBounds { .. }
        )
    }

    /// True when the boundary function itself failed for some x.
    #[must_use]
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(self, Self::Evaluation { .. } | Self::UndefinedBoundary { .. })
    }

    /// The abscissa at which evaluation failed, if this is an evaluation failure.
    #[must_use]
    pub fn failed_at(&self) -> Option<f64> {
        match self {
            Self::Evaluation { x, .. } | Self::UndefinedBoundary { x } => Some(*x),
            _ => None,
        }
    }
}
