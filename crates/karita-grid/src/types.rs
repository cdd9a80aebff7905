//! Shared types for the karita survey grid pipeline.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;

/// A 2D point in the local tangent-plane frame.
///
/// Coordinates are metres from the tangent origin: x increases east,
/// y increases downward (south). This matches the screen-style frame
/// the rest of the pipeline computes in — see
/// [`projection`](crate::projection) for the geodetic conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Metres east of the tangent origin.
    pub x: f64,
    /// Metres south of the tangent origin (y increases downward).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A geodetic surface position in degrees (WGS-84).
///
/// Altitude is intentionally absent: the grid is planar, and altitude
/// is applied when the path is lowered to mission items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geodetic point.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A directed line segment between two points.
///
/// Serves two roles in the pipeline: an over-reaching sweep line before
/// clipping, and a bounded chord afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub p1: Point,
    /// End point.
    pub p2: Point,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Direction angle of the segment in degrees, in `[0, 360)`.
    ///
    /// Measured counter-clockwise from the +X axis **with y increasing
    /// downward**, i.e. `atan2(-dy, dx)` normalized. A segment pointing
    /// due east is 0°, due "up" (−y) is 90°.
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        let dx = self.p2.x - self.p1.x;
        let dy = self.p2.y - self.p1.y;
        let degrees = (-dy).atan2(dx).to_degrees();
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// The same segment with its endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            p1: self.p2,
            p2: self.p1,
        }
    }
}

/// An ordered sequence of local-frame points forming the stitched
/// flight path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPath(Vec<Point>);

impl GridPath {
    /// Create a new path from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the path.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the path and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Configuration for grid generation in the local frame.
///
/// # Invariants
///
/// `spacing` must be positive for any chords to be generated; callers
/// with `spacing <= 0` receive an empty path rather than an error.
/// `turnaround_distance` of 0 disables turnaround insertion entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Sweep angle in degrees from the local +X axis. Any real value is
    /// accepted; it is not normalized.
    pub angle_degrees: f64,

    /// Perpendicular distance between adjacent passes, in metres.
    /// Must be positive for a non-empty result.
    pub spacing: f64,

    /// Distance past each pass endpoint for the vehicle to decelerate
    /// and turn, in metres. 0 disables turnaround points.
    pub turnaround_distance: f64,

    /// Extra length added to both ends of every sweep line before
    /// clipping, in metres. Guarantees the rotated lines span the
    /// polygon. The default matches the historical fixed margin; raise
    /// it for survey areas whose rotated extent exceeds it.
    pub overreach: f64,
}

impl GridConfig {
    /// Default sweep angle in degrees.
    pub const DEFAULT_ANGLE_DEGREES: f64 = 0.0;
    /// Default pass spacing in metres.
    pub const DEFAULT_SPACING: f64 = 30.0;
    /// Default turnaround distance in metres.
    pub const DEFAULT_TURNAROUND_DISTANCE: f64 = 60.0;
    /// Default sweep-line overreach margin in metres.
    pub const DEFAULT_OVERREACH: f64 = 100.0;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            angle_degrees: Self::DEFAULT_ANGLE_DEGREES,
            spacing: Self::DEFAULT_SPACING,
            turnaround_distance: Self::DEFAULT_TURNAROUND_DISTANCE,
            overreach: Self::DEFAULT_OVERREACH,
        }
    }
}

/// Full survey configuration: grid parameters plus the flight and
/// camera settings consumed by metrics and mission-item generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Grid generation parameters.
    pub grid: GridConfig,

    /// Flight altitude in metres, applied to every waypoint.
    pub altitude: f64,

    /// Whether `altitude` is relative to the home position rather than
    /// mean sea level.
    pub relative_altitude: bool,

    /// Whether distance-based camera triggering is enabled.
    pub camera_trigger: bool,

    /// Distance between camera shots in metres. Shot count is 0 when
    /// this is not positive.
    pub trigger_distance: f64,
}

impl SurveyConfig {
    /// Default flight altitude in metres.
    pub const DEFAULT_ALTITUDE: f64 = 50.0;
    /// Default camera trigger distance in metres.
    pub const DEFAULT_TRIGGER_DISTANCE: f64 = 25.0;
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            altitude: Self::DEFAULT_ALTITUDE,
            relative_altitude: true,
            camera_trigger: true,
            trigger_distance: Self::DEFAULT_TRIGGER_DISTANCE,
        }
    }
}

/// Result of planning a survey: the geodetic flight path plus
/// aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResult {
    /// Ordered geodetic waypoints sweeping the polygon.
    pub path: Vec<GeoPoint>,

    /// Polygon area in square metres (shoelace, always non-negative).
    pub covered_area: f64,

    /// Total path length in metres (sum of consecutive distances).
    pub path_length: f64,

    /// Number of camera shots along the path:
    /// `floor(path_length / trigger_distance)`, or 0 when triggering
    /// is disabled or the trigger distance is not positive.
    pub camera_shots: u32,
}

impl SurveyResult {
    /// The empty result returned for degenerate input (fewer than 3
    /// polygon vertices, or non-positive spacing).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            path: Vec::new(),
            covered_area: 0.0,
            path_length: 0.0,
            camera_shots: 0,
        }
    }
}

/// Result of planning with every intermediate stage output preserved.
///
/// Each field captures the output of one pipeline stage, enabling
/// hosts to visualize sweep lines, chords, and the stitched path, and
/// the SVG preview serializer to draw polygon and path together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedSurvey {
    /// Stage 1: polygon vertices projected into the local frame
    /// (open — first point not repeated).
    pub local_polygon: Vec<Point>,
    /// Stage 2: axis-aligned bounds of the polygon, `None` when the
    /// polygon is empty.
    pub bounds: Option<Bounds>,
    /// Stage 2: bounds of the polygon's bounding rectangle rotated by
    /// the sweep angle about its own center.
    pub expanded_bounds: Option<Bounds>,
    /// Stage 3: over-reaching parallel sweep lines.
    pub sweep_lines: Vec<Segment>,
    /// Stage 4: chords clipped against the polygon.
    pub chords: Vec<Segment>,
    /// Stage 5: chords with a consistent direction.
    pub normalized: Vec<Segment>,
    /// Stage 6: the stitched local-frame path.
    pub local_path: GridPath,
    /// Final geodetic path and metrics.
    pub result: SurveyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3.0, 4.0);
        assert!((p.x - 3.0).abs() < f64::EPSILON);
        assert!((p.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!(p.distance(p).abs() < f64::EPSILON);
    }

    // --- Segment tests ---

    #[test]
    fn segment_angle_east_is_zero() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        assert!(s.angle_degrees().abs() < 1e-9);
    }

    #[test]
    fn segment_angle_up_is_ninety() {
        // y increases downward, so -y is "up" and measures 90 degrees.
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(0.0, -5.0));
        assert!((s.angle_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn segment_angle_down_is_two_seventy() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0));
        assert!((s.angle_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn segment_angle_west_is_one_eighty() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(-5.0, 0.0));
        assert!((s.angle_degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn segment_angle_always_in_range() {
        let s = Segment::new(Point::new(2.0, 2.0), Point::new(1.0, 3.0));
        let angle = s.angle_degrees();
        assert!((0.0..360.0).contains(&angle), "angle = {angle}");
    }

    #[test]
    fn segment_reversed_swaps_endpoints() {
        let s = Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let r = s.reversed();
        assert_eq!(r.p1, s.p2);
        assert_eq!(r.p2, s.p1);
    }

    #[test]
    fn segment_length() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((s.length() - 5.0).abs() < f64::EPSILON);
    }

    // --- GridPath tests ---

    #[test]
    fn grid_path_empty() {
        let path = GridPath::new(vec![]);
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert!(path.first().is_none());
        assert!(path.last().is_none());
    }

    #[test]
    fn grid_path_accessors() {
        let path = GridPath::new(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
        ]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&Point::new(1.0, 2.0)));
        assert_eq!(path.last(), Some(&Point::new(5.0, 6.0)));
        assert_eq!(path.into_points().len(), 3);
    }

    // --- Config tests ---

    #[test]
    fn grid_config_defaults() {
        let config = GridConfig::default();
        assert!((config.angle_degrees - 0.0).abs() < f64::EPSILON);
        assert!((config.spacing - 30.0).abs() < f64::EPSILON);
        assert!((config.turnaround_distance - 60.0).abs() < f64::EPSILON);
        assert!((config.overreach - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn survey_config_defaults() {
        let config = SurveyConfig::default();
        assert!((config.altitude - 50.0).abs() < f64::EPSILON);
        assert!(config.relative_altitude);
        assert!(config.camera_trigger);
        assert!((config.trigger_distance - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_result_is_zeroed() {
        let result = SurveyResult::empty();
        assert!(result.path.is_empty());
        assert!((result.covered_area).abs() < f64::EPSILON);
        assert!((result.path_length).abs() < f64::EPSILON);
        assert_eq!(result.camera_shots, 0);
    }

    // --- Serde round-trips ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn survey_config_serde_round_trip() {
        let config = SurveyConfig {
            grid: GridConfig {
                angle_degrees: 37.5,
                spacing: 12.0,
                turnaround_distance: 15.0,
                overreach: 250.0,
            },
            altitude: 80.0,
            relative_altitude: false,
            camera_trigger: true,
            trigger_distance: 18.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SurveyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn survey_result_serde_round_trip() {
        let result = SurveyResult {
            path: vec![GeoPoint::new(47.01, 8.52), GeoPoint::new(47.02, 8.53)],
            covered_area: 1234.5,
            path_length: 321.0,
            camera_shots: 12,
        };
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: SurveyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
