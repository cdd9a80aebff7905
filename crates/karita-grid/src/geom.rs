//! Low-level geometry primitives: rotation and bounded intersection.
//!
//! The bounded segment–segment intersection delegates to the `geo`
//! crate; the pipeline's own [`Point`] is converted at that boundary.
//! Rotation is hand-written — it must behave identically in the y-down
//! local frame whether the angle is 0 or arbitrary.

use geo::Line;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};

use crate::types::{Point, Segment};

/// Convert a pipeline [`Point`] to a `geo::Coord`.
const fn point_to_coord(p: Point) -> geo::Coord<f64> {
    geo::Coord { x: p.x, y: p.y }
}

/// Rotate `point` about `origin` by `angle_degrees`.
///
/// The rotation is counter-clockwise in the standard math sense but
/// operates in a frame where y increases downward, so it appears
/// clockwise on screen. An angle of 0 returns the point unchanged up
/// to floating rounding.
#[must_use]
pub fn rotate_about(point: Point, origin: Point, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;
    Point::new(
        dx.mul_add(cos, -dy * sin) + origin.x,
        dx.mul_add(sin, dy * cos) + origin.y,
    )
}

/// Intersection of two bounded segments, if any.
///
/// Returns `Some` only when the intersection point lies within both
/// segments' extents (endpoint contact counts); intersections that
/// exist only on the infinite extensions do not. Parallel and
/// collinear-overlapping segments yield `None` — "none found", not an
/// error.
#[must_use]
pub fn bounded_intersection(a: &Segment, b: &Segment) -> Option<Point> {
    let line_a = Line::new(point_to_coord(a.p1), point_to_coord(a.p2));
    let line_b = Line::new(point_to_coord(b.p1), point_to_coord(b.p2));

    match line_intersection(line_a, line_b) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            Some(Point::new(intersection.x, intersection.y))
        }
        Some(LineIntersection::Collinear { .. }) | None => None,
    }
}
