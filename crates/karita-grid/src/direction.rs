//! Direction normalization: orient all chords consistently.
//!
//! Clipping order depends on polygon edge order, so adjacent chords
//! can come out pointing in opposite directions. Swapping the
//! endpoints of any chord whose angle exceeds 180° leaves every chord
//! pointing into the upper half-plane, letting the stitcher alternate
//! traversal direction deterministically.

use crate::types::Segment;

/// Reorient chords so every chord's angle is at most 180°.
///
/// Chords already in range pass through unchanged; the rest have their
/// endpoints swapped. Order is preserved.
#[must_use = "returns the reoriented chords"]
pub fn normalize_directions(chords: &[Segment]) -> Vec<Segment> {
    chords
        .iter()
        .map(|chord| {
            if chord.angle_degrees() > 180.0 {
                chord.reversed()
            } else {
                *chord
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn chord_in_range_is_unchanged() {
        // Pointing "up" (-y): 90 degrees.
        let chord = Segment::new(Point::new(5.0, 10.0), Point::new(5.0, 0.0));
        let normalized = normalize_directions(&[chord]);
        assert_eq!(normalized[0], chord);
    }

    #[test]
    fn chord_out_of_range_is_reversed() {
        // Pointing "down" (+y): 270 degrees, gets swapped to 90.
        let chord = Segment::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0));
        let normalized = normalize_directions(&[chord]);
        assert_eq!(normalized[0], chord.reversed());
        assert!(normalized[0].angle_degrees() <= 180.0);
    }

    #[test]
    fn mixed_directions_become_consistent() {
        let chords = vec![
            Segment::new(Point::new(0.0, 10.0), Point::new(0.0, 0.0)),
            Segment::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0)),
            Segment::new(Point::new(10.0, 10.0), Point::new(10.0, 0.0)),
        ];
        let normalized = normalize_directions(&chords);
        for chord in &normalized {
            assert!(
                chord.angle_degrees() <= 180.0,
                "chord still points into the lower half-plane",
            );
        }
    }

    #[test]
    fn exactly_one_eighty_is_unchanged() {
        // Due west is exactly 180 degrees, not > 180.
        let chord = Segment::new(Point::new(10.0, 5.0), Point::new(0.0, 5.0));
        let normalized = normalize_directions(&[chord]);
        assert_eq!(normalized[0], chord);
    }

    #[test]
    fn order_is_preserved() {
        let chords = vec![
            Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 10.0)),
            Segment::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0)),
        ];
        let normalized = normalize_directions(&chords);
        assert!((normalized[0].p1.x - 0.0).abs() < f64::EPSILON);
        assert!((normalized[1].p1.x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_directions(&[]).is_empty());
    }
}
