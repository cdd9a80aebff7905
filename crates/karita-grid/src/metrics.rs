//! Aggregate metrics: covered area, path length, and camera shot
//! count.
//!
//! The area is computed over the original (un-rotated, un-clipped)
//! polygon vertices — it depends only on the polygon, not on any grid
//! parameter. Length and shots are derived from the stitched path.

use geo::{Area, LineString, Polygon};

use crate::types::Point;

/// Area enclosed by the polygon, in square metres.
///
/// Shoelace formula over the vertices in insertion order (the exterior
/// ring is closed implicitly), absolute value — the result is
/// non-negative for either winding and invariant under cyclic rotation
/// of the vertex list. Fewer than 3 vertices enclose nothing and yield
/// 0.
#[must_use]
pub fn covered_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let exterior: LineString<f64> =
        LineString::from(polygon.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>());
    Polygon::new(exterior, Vec::new()).unsigned_area()
}

/// Total length of the path: sum of Euclidean distances between
/// consecutive points. Zero for paths with fewer than 2 points.
#[must_use]
pub fn path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}

/// Number of camera shots along a path of the given length.
///
/// `floor(path_length / trigger_distance)` when the trigger distance
/// is positive, else 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn camera_shots(path_length: f64, trigger_distance: f64) -> u32 {
    if trigger_distance > 0.0 {
        (path_length / trigger_distance).floor() as u32
    } else {
        0
    }
}
