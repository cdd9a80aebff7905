//! Path stitching: walk the ordered chords, alternating traversal
//! direction, and insert turnaround points between passes.
//!
//! Even-indexed chords are flown `p1 → p2`, odd-indexed ones reversed,
//! producing a continuous boustrophedon sweep: each pass ends next to
//! the following pass's entry. With a positive turnaround distance,
//! each pass is bracketed by an entry point short of the chord and an
//! exit point past it, giving the vehicle room to decelerate and turn.

use crate::types::{GridPath, Point, Segment};

/// Stitch normalized chords into a single ordered path.
///
/// With `turnaround > 0`, every chord contributes four points
/// (`entry − offset, entry, exit, exit + offset` where `offset` is the
/// chord direction scaled to `turnaround`); otherwise two. A
/// zero-length chord has no direction to scale, so its offset is
/// treated as zero rather than dividing by zero.
#[must_use = "returns the stitched path"]
pub fn stitch(chords: &[Segment], turnaround: f64) -> GridPath {
    let mut points = Vec::new();

    for (i, chord) in chords.iter().enumerate() {
        let offset = turnaround_offset(chord, turnaround);

        if i % 2 == 1 {
            // Odd pass: fly the chord reversed, p2 -> p1.
            if turnaround > 0.0 {
                points.push(add(chord.p2, offset));
                points.push(chord.p2);
                points.push(chord.p1);
                points.push(sub(chord.p1, offset));
            } else {
                points.push(chord.p2);
                points.push(chord.p1);
            }
        } else if turnaround > 0.0 {
            points.push(sub(chord.p1, offset));
            points.push(chord.p1);
            points.push(chord.p2);
            points.push(add(chord.p2, offset));
        } else {
            points.push(chord.p1);
            points.push(chord.p2);
        }
    }

    GridPath::new(points)
}

/// The chord direction scaled to `turnaround` metres.
///
/// Zero for zero-length chords (the normalization would divide by
/// zero) and when turnarounds are disabled.
fn turnaround_offset(chord: &Segment, turnaround: f64) -> Point {
    let length = chord.length();
    if turnaround <= 0.0 || length <= 0.0 {
        return Point::new(0.0, 0.0);
    }
    let scale = turnaround / length;
    Point::new(
        (chord.p2.x - chord.p1.x) * scale,
        (chord.p2.y - chord.p1.y) * scale,
    )
}

fn add(p: Point, offset: Point) -> Point {
    Point::new(p.x + offset.x, p.y + offset.y)
}

fn sub(p: Point, offset: Point) -> Point {
    Point::new(p.x - offset.x, p.y - offset.y)
}
