//! karita-grid: pure survey grid generation (sans-IO).
//!
//! Converts a geodetic survey polygon into a lawnmower flight path
//! through: tangent-plane projection -> bounding-rectangle rotation ->
//! sweep-line generation -> polygon clipping -> direction
//! normalization -> path stitching, with aggregate metrics (covered
//! area, path length, camera shot count) computed alongside.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! coordinate lists and returns structured data. Plan files, mission
//! items, and previews live in `karita-export`.
//!
//! The pipeline is synchronous and stateless: identical inputs produce
//! bit-identical outputs, so hosts can simply recompute after every
//! parameter edit.

pub mod bounds;
pub mod clip;
pub mod diagnostics;
pub mod direction;
pub mod geom;
pub mod metrics;
pub mod projection;
pub mod stitch;
pub mod sweep;
pub mod types;

use bounds::Bounds;
pub use projection::{Projection, TangentPlane};
pub use types::{
    GeoPoint, GridConfig, GridPath, Point, Segment, StagedSurvey, SurveyConfig, SurveyResult,
};

/// Generate the grid path for a polygon already in the local frame.
///
/// This is the pure planar core: close the polygon, size the sweep
/// family from the angle-expanded bounding rectangle, clip, normalize,
/// and stitch. Fewer than 3 vertices or a non-positive spacing yield
/// an empty path — degenerate input is not an error.
#[must_use]
pub fn grid_points(polygon: &[Point], config: &GridConfig) -> GridPath {
    if polygon.len() < 3 || config.spacing <= 0.0 {
        return GridPath::new(Vec::new());
    }
    let Some(first) = polygon.first().copied() else {
        return GridPath::new(Vec::new());
    };

    // Close the polygon so consecutive pairs enumerate every edge.
    let mut closed = polygon.to_vec();
    closed.push(first);

    let Some(rect) = Bounds::of(&closed) else {
        return GridPath::new(Vec::new());
    };
    let expanded = rect.expand_for_angle(config.angle_degrees);

    let lines = sweep::sweep_lines(&expanded, rect.center(), config);
    let chords = clip::clip_to_polygon(&lines, &closed);
    let normalized = direction::normalize_directions(&chords);
    stitch::stitch(&normalized, config.turnaround_distance)
}

/// Plan a survey over a geodetic polygon.
///
/// The tangent origin is the first polygon vertex. Degenerate input
/// (fewer than 3 vertices, or `spacing <= 0`) returns an empty path
/// and zero metrics rather than an error.
///
/// ```
/// use karita_grid::{GeoPoint, SurveyConfig};
///
/// let polygon = [
///     GeoPoint::new(47.3977, 8.5456),
///     GeoPoint::new(47.3987, 8.5456),
///     GeoPoint::new(47.3987, 8.5470),
///     GeoPoint::new(47.3977, 8.5470),
/// ];
/// let result = karita_grid::plan(&polygon, &SurveyConfig::default());
/// assert!(!result.path.is_empty());
/// assert!(result.covered_area > 0.0);
/// ```
#[must_use]
pub fn plan(polygon: &[GeoPoint], config: &SurveyConfig) -> SurveyResult {
    plan_staged(polygon, config).result
}

/// Plan a survey using a caller-supplied [`Projection`].
#[must_use]
pub fn plan_with(
    projection: &impl Projection,
    polygon: &[GeoPoint],
    config: &SurveyConfig,
) -> SurveyResult {
    plan_staged_with(projection, polygon, config).result
}

/// Like [`plan`], preserving every intermediate stage output.
#[must_use]
pub fn plan_staged(polygon: &[GeoPoint], config: &SurveyConfig) -> StagedSurvey {
    let Some(origin) = polygon.first().copied() else {
        return empty_staged();
    };
    plan_staged_with(&TangentPlane::new(origin), polygon, config)
}

/// Like [`plan_with`], preserving every intermediate stage output.
///
/// Hosts use the intermediates to visualize sweep lines and chords;
/// the SVG preview serializer draws the polygon and path from them.
#[must_use]
pub fn plan_staged_with(
    projection: &impl Projection,
    polygon: &[GeoPoint],
    config: &SurveyConfig,
) -> StagedSurvey {
    if polygon.len() < 3 || config.grid.spacing <= 0.0 {
        return empty_staged();
    }

    // 1. Project the polygon into the local frame.
    let local: Vec<Point> = polygon.iter().map(|g| projection.to_local(*g)).collect();
    let Some(first) = local.first().copied() else {
        return empty_staged();
    };

    // Covered area depends only on the polygon, not the grid.
    let covered_area = metrics::covered_area(&local);

    // 2. Bounding rectangle, expanded for the sweep angle.
    let mut closed = local.clone();
    closed.push(first);
    let Some(rect) = Bounds::of(&closed) else {
        return empty_staged();
    };
    let expanded = rect.expand_for_angle(config.grid.angle_degrees);

    // 3-6. Sweep, clip, normalize, stitch.
    let sweep_lines = sweep::sweep_lines(&expanded, rect.center(), &config.grid);
    let chords = clip::clip_to_polygon(&sweep_lines, &closed);
    let normalized = direction::normalize_directions(&chords);
    let local_path = stitch::stitch(&normalized, config.grid.turnaround_distance);

    // 7. Metrics and the geodetic path.
    let path_length = metrics::path_length(local_path.points());
    let camera_shots = if config.camera_trigger {
        metrics::camera_shots(path_length, config.trigger_distance)
    } else {
        0
    };
    let path: Vec<GeoPoint> = local_path
        .points()
        .iter()
        .map(|p| projection.to_geodetic(*p))
        .collect();

    StagedSurvey {
        local_polygon: local,
        bounds: Some(rect),
        expanded_bounds: Some(expanded),
        sweep_lines,
        chords,
        normalized,
        local_path,
        result: SurveyResult {
            path,
            covered_area,
            path_length,
            camera_shots,
        },
    }
}

/// The staged result for degenerate input: every stage empty.
fn empty_staged() -> StagedSurvey {
    StagedSurvey {
        local_polygon: Vec::new(),
        bounds: None,
        expanded_bounds: None,
        sweep_lines: Vec::new(),
        chords: Vec::new(),
        normalized: Vec::new(),
        local_path: GridPath::new(Vec::new()),
        result: SurveyResult::empty(),
    }
}
