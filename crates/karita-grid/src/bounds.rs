//! Axis-aligned bounds and the rotated-corner expansion.
//!
//! The sweep-line family is generated axis-aligned and then rotated,
//! so it must be sized from the bounding box of the polygon's bounding
//! box *after* rotating that box about its own center by the sweep
//! angle. This enlarged rectangle guarantees coverage of the polygon
//! at any angle.

use serde::{Deserialize, Serialize};

use crate::geom::rotate_about;
use crate::types::Point;

/// Axis-aligned bounding rectangle of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum x/y corner.
    pub min: Point,
    /// Maximum x/y corner.
    pub max: Point,
}

impl Bounds {
    /// Compute the bounds of a point set. Returns `None` for an empty
    /// set.
    ///
    /// A degenerate set (single point, collinear points) produces a
    /// zero-width or zero-height rectangle — valid input for the rest
    /// of the pipeline, which then yields an empty or degenerate chord
    /// set rather than failing.
    #[must_use]
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            f64::midpoint(self.min.x, self.max.x),
            f64::midpoint(self.min.y, self.max.y),
        )
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The four corners, in top-left, top-right, bottom-right,
    /// bottom-left order.
    #[must_use]
    pub const fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Bounds of this rectangle's corners rotated about its own center
    /// by `angle_degrees`.
    ///
    /// The result always contains the original rectangle's rotated
    /// image, so sweep lines spanning it span the polygon after the
    /// same rotation.
    #[must_use]
    pub fn expand_for_angle(&self, angle_degrees: f64) -> Self {
        let center = self.center();
        let rotated = self
            .corners()
            .map(|corner| rotate_about(corner, center, angle_degrees));
        // Four points, so `of` is always Some.
        Self::of(&rotated).unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_set_is_none() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn bounds_of_single_point_is_degenerate() {
        let bounds = Bounds::of(&[Point::new(3.0, 4.0)]).unwrap();
        assert_eq!(bounds.min, Point::new(3.0, 4.0));
        assert_eq!(bounds.max, Point::new(3.0, 4.0));
        assert!(bounds.width().abs() < f64::EPSILON);
        assert!(bounds.height().abs() < f64::EPSILON);
    }

    #[test]
    fn bounds_of_square() {
        let bounds = Bounds::of(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point::new(0.0, 0.0));
        assert_eq!(bounds.max, Point::new(10.0, 10.0));
        assert_eq!(bounds.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn bounds_of_unordered_points() {
        let bounds = Bounds::of(&[
            Point::new(5.0, -2.0),
            Point::new(-1.0, 7.0),
            Point::new(3.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point::new(-1.0, -2.0));
        assert_eq!(bounds.max, Point::new(5.0, 7.0));
    }

    #[test]
    fn expand_at_zero_angle_is_unchanged() {
        let bounds = Bounds::of(&[Point::new(0.0, 0.0), Point::new(10.0, 4.0)]).unwrap();
        let expanded = bounds.expand_for_angle(0.0);
        assert!(expanded.min.distance(bounds.min) < 1e-9);
        assert!(expanded.max.distance(bounds.max) < 1e-9);
    }

    #[test]
    fn expand_forty_five_degrees_grows_square() {
        // A 10x10 square rotated 45 degrees about its center spans
        // 10*sqrt(2) on both axes.
        let bounds = Bounds::of(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap();
        let expanded = bounds.expand_for_angle(45.0);
        let expected = 10.0 * std::f64::consts::SQRT_2;
        assert!((expanded.width() - expected).abs() < 1e-9);
        assert!((expanded.height() - expected).abs() < 1e-9);
        // Center is preserved.
        assert!(expanded.center().distance(bounds.center()) < 1e-9);
    }

    #[test]
    fn expand_contains_original_rect() {
        let bounds = Bounds::of(&[Point::new(-3.0, 1.0), Point::new(9.0, 6.0)]).unwrap();
        let expanded = bounds.expand_for_angle(30.0);
        assert!(expanded.width() >= bounds.width());
        assert!(expanded.height() >= bounds.height());
    }

    #[test]
    fn expand_degenerate_bounds_does_not_panic() {
        // Collinear points: zero-height rectangle.
        let bounds = Bounds::of(&[Point::new(0.0, 5.0), Point::new(10.0, 5.0)]).unwrap();
        let expanded = bounds.expand_for_angle(90.0);
        // Rotating a zero-height rect by 90 degrees swaps the extents.
        assert!((expanded.width()).abs() < 1e-9);
        assert!((expanded.height() - 10.0).abs() < 1e-9);
    }
}
