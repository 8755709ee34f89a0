//! Nearest boundary point and perimeter normalization.
//!
//! # Nearest point
//!
//! For a query point `P` the solver minimizes
//!
//! ```text
//! d(x) = sqrt((P.x - x)² + (P.y - g(x))²),   x ∈ [x.lower, x.upper]
//! ```
//!
//! where `g` is the boundary clamped into the y-range. The query point is
//! always passed in; the solver keeps no per-query state, so one solver can
//! serve any number of queries, in any order, from any number of threads.
//!
//! # Normalization
//!
//! A raw distance means little without a scale. The sweep places `n`
//! samples on each edge of the rectangle, finds each sample's own nearest
//! boundary point, and takes the largest of those distances as the
//! baseline. The query's proportion is `distance / baseline`.
//!
//! | Situation | Proportion |
//! |-----------|------------|
//! | query on the boundary | 0 |
//! | baseline is 0 (every sample on the boundary) | 0 by convention |
//! | query inside the rectangle, typical curve | `[0, 1]` |
//! | query outside the rectangle | may exceed 1 |
//!
//! Exact ties for the maximum go to the earliest sample in sweep order
//! (bottom, top, left, right).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::boundary::{evaluate_clamped, BoundaryFunction};
use crate::error::{Error, Result};
use crate::geometry::{Edge, Point, RectBounds};
use crate::minimize::{minimize_bounded, MinimizeOptions};
use crate::{round_to, DEFAULT_EDGE_SAMPLES, DEFAULT_X_TOLERANCE, ROUND_DECIMALS};

/// What the normalization sweep does when a perimeter sample fails to
/// evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPolicy {
    /// Stop and return the failure.
    #[default]
    Abort,
    /// Drop the sample, count it in [`NormalizationResult::skipped`] and
    /// carry on.
    Skip,
}

/// Tuning knobs for [`BoundaryDistanceSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Absolute x-tolerance of the bounded minimizer.
    pub x_tolerance: f64,
    /// Evaluation cap per minimization.
    pub max_evaluations: usize,
    /// Samples per rectangle edge during normalization.
    pub edge_samples: usize,
    /// Failure handling during normalization.
    pub sweep_policy: SweepPolicy,
}

impl Default for SolverOptions {
    fn default() -> Self {
        let minimize = MinimizeOptions::default();
        Self {
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_evaluations: minimize.max_evaluations,
            edge_samples: DEFAULT_EDGE_SAMPLES,
            sweep_policy: SweepPolicy::Abort,
        }
    }
}

impl SolverOptions {
    /// Set the minimizer's x-tolerance.
    #[must_use]
    pub fn with_x_tolerance(mut self, x_tolerance: f64) -> Self {
        self.x_tolerance = x_tolerance;
        self
    }

    /// Set the per-minimization evaluation cap.
    #[must_use]
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Set the number of samples per edge.
    #[must_use]
    pub fn with_edge_samples(mut self, edge_samples: usize) -> Self {
        self.edge_samples = edge_samples;
        self
    }

    /// Set the sweep failure policy.
    #[must_use]
    pub fn with_sweep_policy(mut self, sweep_policy: SweepPolicy) -> Self {
        self.sweep_policy = sweep_policy;
        self
    }

    fn minimize_options(&self) -> MinimizeOptions {
        MinimizeOptions {
            x_tolerance: self.x_tolerance,
            max_evaluations: self.max_evaluations,
        }
    }
}

/// Closest boundary point to a query and the distance to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Nearest {
    /// Closest point on the clamped boundary.
    pub boundary_point: Point,
    /// Euclidean distance from the query to `boundary_point`.
    pub distance: f64,
}

impl Nearest {
    fn rounded(&self) -> Self {
        Self {
            boundary_point: self.boundary_point.rounded(ROUND_DECIMALS),
            distance: round_to(self.distance, ROUND_DECIMALS),
        }
    }
}

/// Worst-case perimeter distance and the query's share of it.
///
/// All values are rounded to [`ROUND_DECIMALS`] places.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NormalizationResult {
    /// Largest nearest-boundary distance over all perimeter samples.
    pub max_distance: f64,
    /// Edge the maximizing sample lies on.
    pub edge: Edge,
    /// The maximizing perimeter sample.
    pub edge_point: Point,
    /// Boundary point nearest to `edge_point`.
    pub boundary_point: Point,
    /// Query distance divided by `max_distance`; 0 when `max_distance` is 0.
    pub proportion: f64,
    /// Samples dropped under [`SweepPolicy::Skip`].
    pub skipped: usize,
}

impl NormalizationResult {
    /// `proportion` as a percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        round_to(100.0 * self.proportion, ROUND_DECIMALS)
    }
}

/// Everything a renderer needs about one query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceResult {
    /// Closest boundary point, rounded.
    pub closest_point: Point,
    /// Distance to `closest_point`, rounded.
    pub distance: f64,
    /// Present when the solver was built with [`BoundaryDistanceSolver::normalized`].
    pub normalization: Option<NormalizationResult>,
}

/// Nearest-point solver for one boundary over one rectangle.
///
/// # Example
///
/// ```rust
/// use dbdist::{curves, BoundaryDistanceSolver, Point, RectBounds};
///
/// let solver = BoundaryDistanceSolver::new(curves::diagonal, RectBounds::unit());
/// let nearest = solver.solve(&Point::new(0.3, 0.8).unwrap()).unwrap();
///
/// assert_eq!(nearest.boundary_point, Point::new(0.55, 0.55).unwrap());
/// assert_eq!(nearest.distance, 0.35355);
/// ```
#[derive(Debug, Clone)]
pub struct BoundaryDistanceSolver<B> {
    boundary: B,
    bounds: RectBounds,
    normalize: bool,
    options: SolverOptions,
}

impl<B: BoundaryFunction> BoundaryDistanceSolver<B> {
    /// Solver with default options and normalization off.
    pub fn new(boundary: B, bounds: RectBounds) -> Self {
        Self {
            boundary,
            bounds,
            normalize: false,
            options: SolverOptions::default(),
        }
    }

    /// Turn normalization in [`execute`](Self::execute) on or off.
    #[must_use]
    pub fn normalized(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Replace the solver options.
    #[must_use]
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// The boundary function.
    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// The rectangular domain.
    pub fn bounds(&self) -> &RectBounds {
        &self.bounds
    }

    /// Current options.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Whether [`execute`](Self::execute) normalizes.
    pub fn is_normalized(&self) -> bool {
        self.normalize
    }

    /// Boundary value at `x`, clamped into the y-range.
    ///
    /// # Errors
    ///
    /// [`Error::Evaluation`] if the boundary function fails,
    /// [`Error::UndefinedBoundary`] if it returns NaN.
    pub fn evaluate_boundary(&self, x: f64) -> Result<f64> {
        evaluate_clamped(&self.boundary, x, &self.bounds.y())
    }

    /// Elementwise [`evaluate_boundary`](Self::evaluate_boundary). The first
    /// failure fails the whole call.
    pub fn evaluate_boundary_many(&self, xs: &[f64]) -> Result<Vec<f64>> {
        xs.iter().map(|&x| self.evaluate_boundary(x)).collect()
    }

    /// Distance from `query` to the clamped boundary point at `x`.
    pub fn distance_to(&self, x: f64, query: &Point) -> Result<f64> {
        let y = self.evaluate_boundary(x)?;
        Ok((query.x() - x).hypot(query.y() - y))
    }

    /// Full-precision nearest point.
    fn nearest_exact(&self, query: &Point) -> Result<Nearest> {
        let (lower, upper) = self.bounds.x().as_tuple();
        let res = minimize_bounded(
            |x| self.distance_to(x, query),
            lower,
            upper,
            &self.options.minimize_options(),
        )?;
        let y = self.evaluate_boundary(res.x)?;
        Ok(Nearest {
            boundary_point: Point::from_finite(res.x, y),
            distance: res.f_min,
        })
    }

    /// Closest boundary point to `query` and its distance, both rounded to
    /// [`ROUND_DECIMALS`] places.
    ///
    /// Among several equally close boundary points the result is whichever
    /// the minimizer converges to.
    pub fn solve(&self, query: &Point) -> Result<Nearest> {
        self.nearest_exact(query).map(|n| n.rounded())
    }

    /// Normalization baseline using [`SolverOptions::edge_samples`] samples
    /// per edge. `distance` is the query distance to express as a proportion.
    pub fn compute_normalization(&self, distance: f64) -> Result<NormalizationResult> {
        self.compute_normalization_with(distance, self.options.edge_samples)
    }

    /// Normalization baseline with `n` samples per edge.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSampleCount`] if `n == 0`. Under
    /// [`SweepPolicy::Abort`] the first evaluation failure; under
    /// [`SweepPolicy::Skip`], [`Error::NoUsableSamples`] if nothing survives.
    pub fn compute_normalization_with(
        &self,
        distance: f64,
        n: usize,
    ) -> Result<NormalizationResult> {
        if n == 0 {
            return Err(Error::InvalidSampleCount(n));
        }
        let samples = self
            .bounds
            .perimeter(n)
            .into_iter()
            .map(|(edge, p)| (edge, p, self.nearest_exact(&p)));
        self.select_max(distance, samples)
    }

    /// Pick the worst perimeter sample, honouring the sweep policy.
    fn select_max<I>(&self, distance: f64, samples: I) -> Result<NormalizationResult>
    where
        I: IntoIterator<Item = (Edge, Point, Result<Nearest>)>,
    {
        let mut best: Option<(Edge, Point, Nearest)> = None;
        let mut skipped = 0;

        for (edge, p, outcome) in samples {
            let nearest = match outcome {
                Ok(nearest) => nearest,
                Err(e) => match self.options.sweep_policy {
                    SweepPolicy::Abort => return Err(e),
                    SweepPolicy::Skip => {
                        log::debug!("skipping {edge} edge sample {p}: {e}");
                        skipped += 1;
                        continue;
                    }
                },
            };
            // strict comparison: first occurrence wins ties
            if best
                .as_ref()
                .map_or(true, |(_, _, b)| nearest.distance > b.distance)
            {
                best = Some((edge, p, nearest));
            }
        }

        let (edge, edge_point, nearest) = best.ok_or(Error::NoUsableSamples { failed: skipped })?;
        if skipped > 0 {
            log::warn!("normalization skipped {skipped} perimeter samples that failed to evaluate");
        }

        let max_distance = nearest.distance;
        let proportion = if max_distance == 0.0 {
            0.0
        } else {
            distance / max_distance
        };

        Ok(NormalizationResult {
            max_distance: round_to(max_distance, ROUND_DECIMALS),
            edge,
            edge_point: edge_point.rounded(ROUND_DECIMALS),
            boundary_point: nearest.boundary_point.rounded(ROUND_DECIMALS),
            proportion: round_to(proportion, ROUND_DECIMALS),
            skipped,
        })
    }

    /// Solve for `query` and, if enabled, normalize.
    pub fn execute(&self, query: &Point) -> Result<DistanceResult> {
        log::debug!("finding nearest boundary point to {query}");
        let nearest = self.solve(query)?;
        log::debug!(
            "closest boundary point {} at distance {}",
            nearest.boundary_point,
            nearest.distance
        );

        let normalization = if self.normalize {
            let norm = self.compute_normalization(nearest.distance)?;
            log::debug!(
                "max edge distance {} from {} to {}; proportion {}%",
                norm.max_distance,
                norm.edge_point,
                norm.boundary_point,
                norm.percent()
            );
            Some(norm)
        } else {
            None
        };

        Ok(DistanceResult {
            closest_point: nearest.boundary_point,
            distance: nearest.distance,
            normalization,
        })
    }
}

#[cfg(feature = "parallel")]
impl<B: BoundaryFunction + Sync> BoundaryDistanceSolver<B> {
    /// Parallel [`compute_normalization`](Self::compute_normalization).
    ///
    /// Samples are solved concurrently and reduced in sweep order, so the
    /// result is identical to the sequential sweep. Under
    /// [`SweepPolicy::Abort`] every sample is still solved before the first
    /// failure is reported.
    pub fn compute_normalization_par(&self, distance: f64) -> Result<NormalizationResult> {
        self.compute_normalization_par_with(distance, self.options.edge_samples)
    }

    /// Parallel [`compute_normalization_with`](Self::compute_normalization_with).
    pub fn compute_normalization_par_with(
        &self,
        distance: f64,
        n: usize,
    ) -> Result<NormalizationResult> {
        if n == 0 {
            return Err(Error::InvalidSampleCount(n));
        }
        let samples: Vec<_> = self
            .bounds
            .perimeter(n)
            .into_par_iter()
            .map(|(edge, p)| {
                let outcome = self.nearest_exact(&p);
                (edge, p, outcome)
            })
            .collect();
        self.select_max(distance, samples)
    }
}
