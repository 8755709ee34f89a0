//! Points, axis intervals and the rectangular domain.
//!
//! All types here are small `Copy` values validated at construction:
//! once a [`Point`] or [`RectBounds`] exists its invariants hold, so the
//! solver never re-checks them.
//!
//! # Perimeter sampling
//!
//! [`RectBounds::perimeter`] walks the four edges in a fixed order
//! ([`Edge::ALL`]): bottom and top by increasing x, left and right by
//! increasing y. Each edge gets `n` evenly spaced samples including both
//! endpoints, so every corner appears twice.
//!
//! ```text
//!        top  ──────────▶
//!   (xl,yu) ┌──────────┐ (xu,yu)
//!      left ▲          ▲ right
//!   (xl,yl) └──────────┘ (xu,yl)
//!     bottom ──────────▶
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::round_to;

/// Coordinate axis of the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Axis {
    /// Horizontal axis, the boundary's input.
    X,
    /// Vertical axis, the boundary's output.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// An immutable point in the plane with finite coordinates.
///
/// # Example
///
/// ```rust
/// use dbdist::Point;
///
/// let p = Point::new(3.0, 4.0).unwrap();
/// let origin = Point::new(0.0, 0.0).unwrap();
/// assert_eq!(p.distance(&origin), 5.0);
///
/// assert!(Point::new(f64::NAN, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Create a point, rejecting NaN and infinite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                axis: Axis::X,
                value: x,
            });
        }
        if !y.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                axis: Axis::Y,
                value: y,
            });
        }
        Ok(Self { x, y })
    }

    /// Build a point from coordinates already known to be finite.
    #[inline]
    pub(crate) fn from_finite(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite point ({x}, {y})");
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Copy of this point with both coordinates rounded to `decimals` places.
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            x: round_to(self.x, decimals),
            y: round_to(self.y, decimals),
        }
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = Error;

    fn try_from((x, y): (f64, f64)) -> Result<Self> {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed interval `[lower, upper]` on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisBounds {
    lower: f64,
    upper: f64,
}

impl AxisBounds {
    /// Create an interval. Zero-width intervals are allowed.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteBounds`] if either limit is NaN or infinite, or
    /// if `upper - lower` overflows; [`Error::InvertedBounds`] if
    /// `upper < lower`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::NonFiniteBounds { lower, upper });
        }
        if upper < lower {
            return Err(Error::InvertedBounds { lower, upper });
        }
        // the extent must be finite too
        if !(upper - lower).is_finite() {
            return Err(Error::NonFiniteBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower limit.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper limit.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.upper - self.lower
    }

    /// Centre of the interval.
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// `(lower, upper)`.
    #[inline]
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Whether `v` lies in the closed interval.
    #[inline]
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }

    /// Clamp `v` into the interval. Infinities map to the matching limit;
    /// NaN is returned unchanged.
    #[inline]
    #[must_use]
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.lower, self.upper)
    }

    /// `n` evenly spaced values from `lower` to `upper` inclusive.
    #[must_use]
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        linspace(self.lower, self.upper, n)
    }
}

impl TryFrom<(f64, f64)> for AxisBounds {
    type Error = Error;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self> {
        Self::new(lower, upper)
    }
}

/// `n` evenly spaced values over `[start, stop]`, endpoints included.
///
/// The last value is exactly `stop`. `n == 1` yields `[start]`, `n == 0`
/// yields nothing.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// One side of the rectangular domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Edge {
    /// `y = y.lower`, walked by increasing x.
    Bottom,
    /// `y = y.upper`, walked by increasing x.
    Top,
    /// `x = x.lower`, walked by increasing y.
    Left,
    /// `x = x.upper`, walked by increasing y.
    Right,
}

impl Edge {
    /// Sweep order used for normalization.
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Top, Edge::Left, Edge::Right];

    /// `n` evenly spaced points along this edge of `bounds`.
    #[must_use]
    pub fn samples(self, bounds: &RectBounds, n: usize) -> Vec<Point> {
        let (x, y) = (bounds.x(), bounds.y());
        match self {
            Edge::Bottom => x
                .linspace(n)
                .into_iter()
                .map(|px| Point::from_finite(px, y.lower()))
                .collect(),
            Edge::Top => x
                .linspace(n)
                .into_iter()
                .map(|px| Point::from_finite(px, y.upper()))
                .collect(),
            Edge::Left => y
                .linspace(n)
                .into_iter()
                .map(|py| Point::from_finite(x.lower(), py))
                .collect(),
            Edge::Right => y
                .linspace(n)
                .into_iter()
                .map(|py| Point::from_finite(x.upper(), py))
                .collect(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Bottom => "bottom",
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Right => "right",
        };
        f.write_str(name)
    }
}

/// An axis-aligned closed rectangle.
///
/// The area is derived once at construction; the `with_*` setters rebuild
/// the whole value so it never goes stale.
///
/// # Example
///
/// ```rust
/// use dbdist::RectBounds;
///
/// let b = RectBounds::from_ranges((0.0, 1.0), (5.0, 8.0)).unwrap();
/// assert_eq!(b.x().extent(), 1.0);
/// assert_eq!(b.area(), 3.0);
///
/// assert!(RectBounds::from_ranges((1.0, 0.0), (0.0, 1.0)).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RectBounds {
    x: AxisBounds,
    y: AxisBounds,
    area: f64,
}

impl RectBounds {
    /// Rectangle spanned by two intervals.
    #[must_use]
    pub fn new(x: AxisBounds, y: AxisBounds) -> Self {
        Self {
            x,
            y,
            area: x.extent() * y.extent(),
        }
    }

    /// Rectangle from raw `(lower, upper)` ranges.
    pub fn from_ranges(x: (f64, f64), y: (f64, f64)) -> Result<Self> {
        Ok(Self::new(AxisBounds::try_from(x)?, AxisBounds::try_from(y)?))
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        let unit = AxisBounds {
            lower: 0.0,
            upper: 1.0,
        };
        Self::new(unit, unit)
    }

    /// Horizontal interval.
    #[inline]
    #[must_use]
    pub fn x(&self) -> AxisBounds {
        self.x
    }

    /// Vertical interval.
    #[inline]
    #[must_use]
    pub fn y(&self) -> AxisBounds {
        self.y
    }

    /// `x.extent * y.extent`.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Same rectangle with a new horizontal interval.
    #[must_use]
    pub fn with_x(self, x: AxisBounds) -> Self {
        Self::new(x, self.y)
    }

    /// Same rectangle with a new vertical interval.
    #[must_use]
    pub fn with_y(self, y: AxisBounds) -> Self {
        Self::new(self.x, y)
    }

    /// Whether `p` lies inside or on the rectangle.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        self.x.contains(p.x()) && self.y.contains(p.y())
    }

    /// Corners: bottom-left, bottom-right, top-left, top-right.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::from_finite(self.x.lower, self.y.lower),
            Point::from_finite(self.x.upper, self.y.lower),
            Point::from_finite(self.x.lower, self.y.upper),
            Point::from_finite(self.x.upper, self.y.upper),
        ]
    }

    /// All `4 * n` perimeter samples in sweep order, tagged with their edge.
    #[must_use]
    pub fn perimeter(&self, n: usize) -> Vec<(Edge, Point)> {
        Edge::ALL
            .iter()
            .flat_map(|&edge| edge.samples(self, n).into_iter().map(move |p| (edge, p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_accessors() {
        let p = Point::new(3.0, 5.1).unwrap();
        assert_eq!(p.x(), 3.0);
        assert_eq!(p.y(), 5.1);
        assert_eq!(<(f64, f64)>::from(p), (3.0, 5.1));
    }

    #[test]
    fn test_point_rejects_non_finite() {
        let err = Point::new(f64::NAN, 5.1).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteCoordinate { axis: Axis::X, .. }
        ));

        let err = Point::try_from((0.0, f64::NEG_INFINITY)).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteCoordinate { axis: Axis::Y, .. }
        ));
    }

    #[test]
    fn test_point_rounded() {
        let p = Point::new(0.5500000012, 0.123456789).unwrap().rounded(5);
        assert_eq!(p.x(), 0.55);
        assert_eq!(p.y(), 0.12346);
    }

    #[test]
    fn test_axis_bounds() {
        let ab = AxisBounds::new(0.0, 1.0).unwrap();
        assert_eq!(ab.lower(), 0.0);
        assert_eq!(ab.upper(), 1.0);
        assert_eq!(ab.extent(), 1.0);
        assert_eq!(ab.as_tuple(), (0.0, 1.0));
        assert_eq!(ab.clamp(1.7), 1.0);
        assert_eq!(ab.clamp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_axis_bounds_zero_width() {
        let ab = AxisBounds::new(0.5, 0.5).unwrap();
        assert_eq!(ab.extent(), 0.0);
        assert!(ab.contains(0.5));
    }

    #[test]
    fn test_axis_bounds_invalid() {
        assert!(matches!(
            AxisBounds::new(1.0, 0.0),
            Err(Error::InvertedBounds { .. })
        ));
        assert!(matches!(
            AxisBounds::new(0.0, f64::INFINITY),
            Err(Error::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn test_axis_bounds_extent_must_be_finite() {
        // both limits finite, but the width overflows
        assert!(matches!(
            AxisBounds::new(-1e308, 1e308),
            Err(Error::NonFiniteBounds { .. })
        ));
        let ab = AxisBounds::new(-1e307, 1e307).unwrap();
        assert!(ab.extent().is_finite());
        assert!(ab.linspace(5).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_distance_does_not_overflow() {
        let far = Point::new(1e200, -1e200).unwrap();
        let origin = Point::new(0.0, 0.0).unwrap();
        let d = far.distance(&origin);
        assert!(d.is_finite());
        assert!((d / (2f64.sqrt() * 1e200) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rect_area() {
        let b = RectBounds::from_ranges((0.0, 1.0), (5.0, 8.1)).unwrap();
        assert!((b.area() - 3.1).abs() < 1e-9);
        assert_eq!(b.x().as_tuple(), (0.0, 1.0));
        assert_eq!(b.y().as_tuple(), (5.0, 8.1));
    }

    #[test]
    fn test_rect_setter_recomputes_area() {
        let b = RectBounds::unit();
        assert_eq!(b.area(), 1.0);
        let wider = b.with_x(AxisBounds::new(0.0, 3.0).unwrap());
        assert_eq!(wider.area(), 3.0);
        let taller = wider.with_y(AxisBounds::new(-1.0, 1.0).unwrap());
        assert_eq!(taller.area(), 6.0);
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.2, 1.0, 1), vec![0.2]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let v = linspace(0.0, 0.3, 7);
        assert_eq!(v[6], 0.3);
    }

    #[test]
    fn test_perimeter_order_and_corners() {
        let b = RectBounds::from_ranges((0.0, 2.0), (0.0, 1.0)).unwrap();
        let samples = b.perimeter(3);
        assert_eq!(samples.len(), 12);

        let edges: Vec<Edge> = samples.iter().map(|(e, _)| *e).collect();
        assert_eq!(&edges[0..3], &[Edge::Bottom; 3]);
        assert_eq!(&edges[3..6], &[Edge::Top; 3]);
        assert_eq!(&edges[6..9], &[Edge::Left; 3]);
        assert_eq!(&edges[9..12], &[Edge::Right; 3]);

        let pts: Vec<(f64, f64)> = samples.iter().map(|(_, p)| (*p).into()).collect();
        assert_eq!(pts[0], (0.0, 0.0));
        assert_eq!(pts[1], (1.0, 0.0));
        assert_eq!(pts[5], (2.0, 1.0));
        assert_eq!(pts[7], (0.0, 0.5));
        assert_eq!(pts[11], (2.0, 1.0));

        // every corner is visited exactly twice
        for corner in b.corners() {
            let hits = samples.iter().filter(|(_, p)| *p == corner).count();
            assert_eq!(hits, 2, "corner {corner}");
        }
    }

    #[test]
    fn test_contains() {
        let b = RectBounds::unit();
        assert!(b.contains(&Point::new(1.0, 0.0).unwrap()));
        assert!(!b.contains(&Point::new(1.01, 0.5).unwrap()));
    }
}
