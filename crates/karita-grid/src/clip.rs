//! Clip sweep lines against the polygon, producing bounded chords.
//!
//! Each sweep line is tested against every polygon edge in insertion
//! order. The first bounded intersection becomes the chord's first
//! endpoint, the second becomes its other endpoint, and the edge walk
//! stops immediately — any further intersections on the same line are
//! ignored. Lines with fewer than two hits produce no chord.
//!
//! Taking the first two intersections in edge order is a deliberate
//! simplification that is correct for simple polygons where each sweep
//! line crosses the boundary exactly twice. Self-intersecting or
//! strongly concave polygons can yield chords that skip interior
//! re-entries; callers get a best-effort result, never a failure. This
//! behavior is kept as-is for compatibility with existing plans.

use crate::geom::bounded_intersection;
use crate::types::{Point, Segment};

/// Clip each line in `lines` against `closed_polygon`.
///
/// `closed_polygon` must have its first vertex repeated at the end so
/// consecutive pairs enumerate every edge. Lines crossing fewer than
/// two edges are discarded; the output order follows the input sweep
/// order.
#[must_use = "returns the clipped chords"]
pub fn clip_to_polygon(lines: &[Segment], closed_polygon: &[Point]) -> Vec<Segment> {
    let mut chords = Vec::new();

    for line in lines {
        let mut first: Option<Point> = None;
        let mut second: Option<Point> = None;

        for edge in closed_polygon.windows(2) {
            let edge = Segment::new(edge[0], edge[1]);
            if let Some(hit) = bounded_intersection(line, &edge) {
                if first.is_none() {
                    first = Some(hit);
                } else {
                    second = Some(hit);
                    break;
                }
            }
        }

        if let (Some(p1), Some(p2)) = (first, second) {
            chords.push(Segment::new(p1, p2));
        }
    }

    chords
}
