//! Sweep-line generation: a family of parallel, over-reaching lines
//! covering the expanded bounding rectangle at the configured angle.
//!
//! Lines are constructed vertically on a grid of x positions and then
//! rotated into place about the center of the *un-expanded* bounding
//! rectangle — the same pivot used to expand the rectangle, so the
//! rotated family stays registered with the polygon.

use crate::bounds::Bounds;
use crate::geom::rotate_about;
use crate::types::{GridConfig, Point, Segment};

/// Generate the parallel sweep-line family for `area`.
///
/// `area` is the angle-expanded bounding rectangle; `pivot` is the
/// center of the original polygon bounds. Starting half a spacing to
/// the left of the area, one vertical line is emitted per `spacing`
/// step while `x < area.max.x`, running from `config.overreach` above
/// the area to the same margin below it, with both endpoints rotated
/// by `config.angle_degrees`.
///
/// Contract: callers must not invoke this with `spacing <= 0` — the
/// pipeline short-circuits to an empty path before reaching here. A
/// non-positive spacing would loop forever, so this returns an empty
/// family defensively instead.
#[must_use]
pub fn sweep_lines(area: &Bounds, pivot: Point, config: &GridConfig) -> Vec<Segment> {
    if config.spacing <= 0.0 {
        return Vec::new();
    }

    let y_top = area.min.y - config.overreach;
    let y_bottom = area.max.y + config.overreach;

    let mut lines = Vec::new();
    let mut x = config.spacing.mul_add(-0.5, area.min.x);
    while x < area.max.x {
        lines.push(Segment::new(
            rotate_about(Point::new(x, y_top), pivot, config.angle_degrees),
            rotate_about(Point::new(x, y_bottom), pivot, config.angle_degrees),
        ));
        x += config.spacing;
    }

    lines
}
