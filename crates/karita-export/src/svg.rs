//! SVG preview serializer.
//!
//! Renders a staged survey as an SVG document: the polygon outline as
//! a dashed closed path, the flight path as a solid polyline. The
//! coordinate space is the local tangent-plane frame in metres
//! (y-down, matching SVG), with the `viewBox` padded around the
//! combined extents of polygon and path.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Title};
use svg::node::{Text, Value};

use karita_grid::bounds::Bounds;
use karita_grid::{Point, StagedSurvey};

/// Fraction of the longer extent added as padding on every side.
const MARGIN_RATIO: f64 = 0.05;

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted after the opening `<svg>` tag. Text values are
/// XML-escaped by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`. Typically the plan name.
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`. Typically the grid
    /// parameters, so exported previews are distinguishable.
    pub description: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from local-frame points.
///
/// Uses `M` for the first point and `L` for subsequent points, with
/// `Z` appended when `close` is set. Returns an empty string for
/// fewer than 2 points.
fn path_data(points: &[Point], close: bool) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    if points.len() < 2 {
        return String::new();
    }

    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    if close {
        data = data.close();
    }
    String::from(Value::from(data))
}

/// Serialize a staged survey into an SVG document string.
///
/// The polygon outline is drawn dashed in gray, the flight path solid
/// in black. An empty survey (degenerate input) produces a minimal
/// valid document with no paths.
#[must_use]
pub fn to_svg(staged: &StagedSurvey, metadata: &SvgMetadata<'_>) -> String {
    let mut extent: Vec<Point> = staged.local_polygon.clone();
    extent.extend_from_slice(staged.local_path.points());
    let extent_bounds = Bounds::of(&extent);

    let mut doc = match extent_bounds {
        Some(bounds) => {
            let longer = bounds.width().max(bounds.height());
            let margin = (longer * MARGIN_RATIO).max(1.0);
            let width = 2.0f64.mul_add(margin, bounds.width());
            let height = 2.0f64.mul_add(margin, bounds.height());
            Document::new()
                .set("width", width)
                .set("height", height)
                .set(
                    "viewBox",
                    format!(
                        "{} {} {} {}",
                        bounds.min.x - margin,
                        bounds.min.y - margin,
                        width,
                        height,
                    ),
                )
        }
        None => Document::new().set("viewBox", "0 0 1 1"),
    };

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    // Stroke width proportional to the drawing, so previews of 100 m
    // and 10 km surveys both render with visible lines.
    let stroke = extent_bounds.map_or(1.0, |b| (b.width().max(b.height()) * 0.005).max(0.1));

    let outline = path_data(&staged.local_polygon, true);
    if !outline.is_empty() {
        doc = doc.add(
            Path::new()
                .set("d", outline)
                .set("fill", "none")
                .set("stroke", "#888888")
                .set("stroke-width", stroke)
                .set("stroke-dasharray", format!("{} {}", stroke * 4.0, stroke * 2.0)),
        );
    }

    let flight = path_data(staged.local_path.points(), false);
    if !flight.is_empty() {
        doc = doc.add(
            Path::new()
                .set("d", flight)
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-width", stroke),
        );
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
