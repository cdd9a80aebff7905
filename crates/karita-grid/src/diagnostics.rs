//! Pipeline diagnostics: timing, counts, and metrics for each stage.
//!
//! Permanent instrumentation for parameter tuning — every call to
//! [`plan_with_diagnostics`] runs the same pipeline as
//! [`plan`](crate::plan) while collecting per-stage durations and
//! counts.
//!
//! Time is abstracted behind the [`Clock`] trait so this crate stays
//! free of platform timing assumptions; the CLI supplies a
//! `std::time::Instant`-backed implementation. Durations are
//! serialized as fractional seconds (`f64`) for JSON compatibility,
//! since `std::time::Duration` does not implement serde traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::projection::{Projection, TangentPlane};
use crate::types::{GeoPoint, Point, SurveyConfig, SurveyResult};
use crate::{clip, direction, metrics, stitch, sweep};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Monotonic time source for stage timing.
///
/// Implementations supply an opaque instant type and measure elapsed
/// wall-clock time from it.
pub trait Clock {
    /// An opaque point in time.
    type Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single planning run.
///
/// Degenerate input still produces diagnostics — every stage reports
/// zero counts and near-zero durations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDiagnostics {
    /// Stage 1: tangent-plane projection of the polygon.
    pub projection: StageDiagnostics,
    /// Stage 2: bounding rectangle and angle expansion.
    pub bounds: StageDiagnostics,
    /// Stage 3: sweep-line generation.
    pub sweep: StageDiagnostics,
    /// Stage 4: polygon clipping.
    pub clip: StageDiagnostics,
    /// Stage 5: direction normalization.
    pub normalize: StageDiagnostics,
    /// Stage 6: path stitching.
    pub stitch: StageDiagnostics,
    /// Stage 7: metrics aggregation and un-projection.
    pub metrics: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: SurveySummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Projection metrics.
    Projection {
        /// Number of polygon vertices projected.
        vertex_count: usize,
    },
    /// Bounding-rectangle metrics.
    Bounds {
        /// Width of the polygon bounds in metres.
        width: f64,
        /// Height of the polygon bounds in metres.
        height: f64,
        /// Width after rotating for the sweep angle.
        expanded_width: f64,
        /// Height after rotating for the sweep angle.
        expanded_height: f64,
    },
    /// Sweep-line generation metrics.
    Sweep {
        /// Sweep angle in degrees.
        angle_degrees: f64,
        /// Pass spacing in metres.
        spacing: f64,
        /// Number of sweep lines generated.
        line_count: usize,
    },
    /// Clipping metrics.
    Clip {
        /// Number of sweep lines tested.
        input_line_count: usize,
        /// Number of chords produced.
        chord_count: usize,
        /// Lines discarded for crossing fewer than two edges.
        discarded_count: usize,
    },
    /// Direction-normalization metrics.
    Normalize {
        /// Number of chords processed.
        chord_count: usize,
        /// Chords whose endpoints were swapped.
        reversed_count: usize,
    },
    /// Stitching metrics.
    Stitch {
        /// Turnaround distance in metres.
        turnaround_distance: f64,
        /// Number of chords stitched.
        chord_count: usize,
        /// Points in the stitched path.
        point_count: usize,
    },
    /// Metrics-aggregation results.
    Metrics {
        /// Covered area in square metres.
        covered_area: f64,
        /// Path length in metres.
        path_length: f64,
        /// Camera shot count.
        camera_shots: u32,
    },
}

/// High-level summary counts for the entire run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySummary {
    /// Number of polygon vertices.
    pub vertex_count: usize,
    /// Number of sweep lines generated.
    pub sweep_line_count: usize,
    /// Number of chords after clipping.
    pub chord_count: usize,
    /// Points in the final path.
    pub path_point_count: usize,
    /// Covered area in square metres.
    pub covered_area: f64,
    /// Path length in metres.
    pub path_length: f64,
    /// Camera shot count.
    pub camera_shots: u32,
}

impl SurveyDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Survey Planning Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Polygon: {} vertices, {:.1} m^2",
            self.summary.vertex_count, self.summary.covered_area,
        ));
        lines.push(format!(
            "Path: {} points, {:.1} m, {} camera shots",
            self.summary.path_point_count, self.summary.path_length, self.summary.camera_shots,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<14} {:>10} {:>8}  {}",
            "Stage", "Duration", "% Total", "Details",
        ));
        lines.push("-".repeat(60));

        for (name, stage) in [
            ("Projection", &self.projection),
            ("Bounds", &self.bounds),
            ("Sweep", &self.sweep),
            ("Clip", &self.clip),
            ("Normalize", &self.normalize),
            ("Stitch", &self.stitch),
            ("Metrics", &self.metrics),
        ] {
            let ms = duration_ms(stage.duration);
            let total_ms = duration_ms(self.total_duration);
            let percent = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "{name:<14} {ms:>8.3}ms {percent:>7.1}%  {}",
                stage.metrics.details(),
            ));
        }

        lines.join("\n")
    }
}

impl StageMetrics {
    /// One-line detail string for the report table.
    fn details(&self) -> String {
        match self {
            Self::Projection { vertex_count } => format!("{vertex_count} vertices"),
            Self::Bounds {
                width,
                height,
                expanded_width,
                expanded_height,
            } => format!(
                "{width:.1}x{height:.1} m -> {expanded_width:.1}x{expanded_height:.1} m",
            ),
            Self::Sweep {
                angle_degrees,
                spacing,
                line_count,
            } => format!("{line_count} lines @ {spacing:.1} m, {angle_degrees:.1} deg"),
            Self::Clip {
                input_line_count,
                chord_count,
                discarded_count,
            } => format!("{chord_count}/{input_line_count} chords ({discarded_count} discarded)"),
            Self::Normalize {
                chord_count,
                reversed_count,
            } => format!("{reversed_count}/{chord_count} reversed"),
            Self::Stitch {
                turnaround_distance,
                chord_count,
                point_count,
            } => format!(
                "{chord_count} chords -> {point_count} points, turnaround {turnaround_distance:.1} m",
            ),
            Self::Metrics {
                covered_area,
                path_length,
                camera_shots,
            } => format!("{covered_area:.1} m^2, {path_length:.1} m, {camera_shots} shots"),
        }
    }
}

/// Duration in fractional milliseconds.
fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Run the planning pipeline while collecting per-stage diagnostics.
///
/// Produces the same [`SurveyResult`] as [`plan`](crate::plan) —
/// timing instrumentation must never change the output.
pub fn plan_with_diagnostics<C: Clock>(
    polygon: &[GeoPoint],
    config: &SurveyConfig,
    clock: &C,
) -> (SurveyResult, SurveyDiagnostics) {
    let total_start = clock.now();

    // Stage 1: projection.
    let stage_start = clock.now();
    let degenerate = polygon.len() < 3 || config.grid.spacing <= 0.0;
    let local: Vec<Point> = if degenerate {
        Vec::new()
    } else {
        polygon
            .first()
            .map(|origin| {
                let plane = TangentPlane::new(*origin);
                polygon.iter().map(|g| plane.to_local(*g)).collect()
            })
            .unwrap_or_default()
    };
    let projection_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Projection {
            vertex_count: local.len(),
        },
    };

    // Stage 2: bounds.
    let stage_start = clock.now();
    let closed: Vec<Point> = local.first().map_or_else(Vec::new, |first| {
        let mut closed = local.clone();
        closed.push(*first);
        closed
    });
    let rect = Bounds::of(&closed);
    let expanded = rect.map(|r| r.expand_for_angle(config.grid.angle_degrees));
    let bounds_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Bounds {
            width: rect.map_or(0.0, |r| r.width()),
            height: rect.map_or(0.0, |r| r.height()),
            expanded_width: expanded.map_or(0.0, |r| r.width()),
            expanded_height: expanded.map_or(0.0, |r| r.height()),
        },
    };

    // Stage 3: sweep lines.
    let stage_start = clock.now();
    let lines = match (rect, expanded) {
        (Some(rect), Some(expanded)) => {
            sweep::sweep_lines(&expanded, rect.center(), &config.grid)
        }
        _ => Vec::new(),
    };
    let sweep_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Sweep {
            angle_degrees: config.grid.angle_degrees,
            spacing: config.grid.spacing,
            line_count: lines.len(),
        },
    };

    // Stage 4: clipping.
    let stage_start = clock.now();
    let chords = clip::clip_to_polygon(&lines, &closed);
    let clip_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Clip {
            input_line_count: lines.len(),
            chord_count: chords.len(),
            discarded_count: lines.len() - chords.len(),
        },
    };

    // Stage 5: normalization.
    let stage_start = clock.now();
    let reversed_count = chords
        .iter()
        .filter(|c| c.angle_degrees() > 180.0)
        .count();
    let normalized = direction::normalize_directions(&chords);
    let normalize_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Normalize {
            chord_count: normalized.len(),
            reversed_count,
        },
    };

    // Stage 6: stitching.
    let stage_start = clock.now();
    let local_path = stitch::stitch(&normalized, config.grid.turnaround_distance);
    let stitch_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Stitch {
            turnaround_distance: config.grid.turnaround_distance,
            chord_count: normalized.len(),
            point_count: local_path.len(),
        },
    };

    // Stage 7: metrics and un-projection.
    let stage_start = clock.now();
    let covered_area = metrics::covered_area(&local);
    let path_length = metrics::path_length(local_path.points());
    let camera_shots = if config.camera_trigger {
        metrics::camera_shots(path_length, config.trigger_distance)
    } else {
        0
    };
    let path: Vec<GeoPoint> = polygon.first().map_or_else(Vec::new, |origin| {
        let plane = TangentPlane::new(*origin);
        local_path
            .points()
            .iter()
            .map(|p| plane.to_geodetic(*p))
            .collect()
    });
    let metrics_stage = StageDiagnostics {
        duration: clock.elapsed(&stage_start),
        metrics: StageMetrics::Metrics {
            covered_area,
            path_length,
            camera_shots,
        },
    };

    let result = SurveyResult {
        path,
        covered_area,
        path_length,
        camera_shots,
    };

    let summary = SurveySummary {
        vertex_count: local.len(),
        sweep_line_count: lines.len(),
        chord_count: chords.len(),
        path_point_count: result.path.len(),
        covered_area,
        path_length,
        camera_shots,
    };

    let diagnostics = SurveyDiagnostics {
        projection: projection_stage,
        bounds: bounds_stage,
        sweep: sweep_stage,
        clip: clip_stage,
        normalize: normalize_stage,
        stitch: stitch_stage,
        metrics: metrics_stage,
        total_duration: clock.elapsed(&total_start),
        summary,
    };

    (result, diagnostics)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Deterministic clock for tests: every call advances one tick.
    struct TickClock;

    impl Clock for TickClock {
        type Instant = ();

        fn now(&self) {}

        fn elapsed(&self, _since: &()) -> Duration {
            Duration::from_micros(10)
        }
    }

    fn geo_square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(47.3977, 8.5456),
            GeoPoint::new(47.3987, 8.5456),
            GeoPoint::new(47.3987, 8.5470),
            GeoPoint::new(47.3977, 8.5470),
        ]
    }

    #[test]
    fn diagnostics_match_plain_plan() {
        let config = SurveyConfig::default();
        let (result, _) = plan_with_diagnostics(&geo_square(), &config, &TickClock);
        let plain = crate::plan(&geo_square(), &config);
        assert_eq!(result, plain);
    }

    #[test]
    fn summary_counts_are_consistent() {
        let config = SurveyConfig::default();
        let (result, diagnostics) = plan_with_diagnostics(&geo_square(), &config, &TickClock);

        assert_eq!(diagnostics.summary.vertex_count, 4);
        assert_eq!(diagnostics.summary.path_point_count, result.path.len());
        assert!(diagnostics.summary.sweep_line_count >= diagnostics.summary.chord_count);
    }

    #[test]
    fn degenerate_input_produces_zeroed_diagnostics() {
        let config = SurveyConfig::default();
        let (result, diagnostics) = plan_with_diagnostics(&[], &config, &TickClock);

        assert_eq!(result, SurveyResult::empty());
        assert_eq!(diagnostics.summary.vertex_count, 0);
        assert_eq!(diagnostics.summary.sweep_line_count, 0);
        assert_eq!(diagnostics.summary.path_point_count, 0);
    }

    #[test]
    fn clip_stage_accounts_for_every_line() {
        let config = SurveyConfig::default();
        let (_, diagnostics) = plan_with_diagnostics(&geo_square(), &config, &TickClock);

        let StageMetrics::Clip {
            input_line_count,
            chord_count,
            discarded_count,
        } = diagnostics.clip.metrics
        else {
            unreachable!("clip stage carries clip metrics");
        };
        assert_eq!(input_line_count, chord_count + discarded_count);
    }

    #[test]
    fn report_mentions_every_stage() {
        let config = SurveyConfig::default();
        let (_, diagnostics) = plan_with_diagnostics(&geo_square(), &config, &TickClock);
        let report = diagnostics.report();

        for stage in [
            "Projection",
            "Bounds",
            "Sweep",
            "Clip",
            "Normalize",
            "Stitch",
            "Metrics",
        ] {
            assert!(report.contains(stage), "report missing stage {stage}");
        }
    }

    #[test]
    fn diagnostics_serialize_to_json() {
        let config = SurveyConfig::default();
        let (_, diagnostics) = plan_with_diagnostics(&geo_square(), &config, &TickClock);

        let json = serde_json::to_string(&diagnostics).unwrap();
        let deserialized: SurveyDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(
            deserialized.summary.path_point_count,
            diagnostics.summary.path_point_count,
        );
    }
}
