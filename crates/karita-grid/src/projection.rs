//! Geodetic ⇄ local tangent-plane conversion.
//!
//! The grid pipeline is planar; geodetic polygon vertices are flattened
//! onto a tangent plane anchored at an origin vertex before any
//! geometry runs, and the stitched path is lifted back afterwards.
//!
//! [`Projection`] is the seam: hosts with a full geodesy stack
//! implement it with their own projector. [`TangentPlane`] is the
//! built-in implementation — an equirectangular small-angle
//! approximation that round-trips well within survey tolerances for
//! regions up to tens of kilometres. It is not valid near the poles.

use serde::{Deserialize, Serialize};

use crate::types::{GeoPoint, Point};

/// Mean Earth radius in metres (spherical approximation).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Conversion between geodetic coordinates and the local planar frame.
///
/// Implementations must be mutually consistent: `to_geodetic` applied
/// to `to_local`'s output recovers the input within projection
/// tolerance for the region sizes involved.
pub trait Projection {
    /// Project a geodetic point into the local frame
    /// (x east, y increasing downward).
    fn to_local(&self, geo: GeoPoint) -> Point;

    /// Lift a local-frame point back to geodetic coordinates.
    fn to_geodetic(&self, point: Point) -> GeoPoint;
}

/// Equirectangular tangent plane anchored at `origin`.
///
/// North displacement maps to −y and east to +x, so the local frame
/// matches the screen-style y-down convention of the rest of the
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentPlane {
    origin: GeoPoint,
    cos_origin_lat: f64,
}

impl TangentPlane {
    /// Create a tangent plane anchored at `origin`.
    #[must_use]
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            cos_origin_lat: origin.latitude.to_radians().cos(),
        }
    }

    /// The anchor point of this plane.
    #[must_use]
    pub const fn origin(&self) -> GeoPoint {
        self.origin
    }
}

impl Projection for TangentPlane {
    fn to_local(&self, geo: GeoPoint) -> Point {
        let north = (geo.latitude - self.origin.latitude).to_radians() * EARTH_RADIUS_M;
        let east = (geo.longitude - self.origin.longitude).to_radians()
            * EARTH_RADIUS_M
            * self.cos_origin_lat;
        Point::new(east, -north)
    }

    fn to_geodetic(&self, point: Point) -> GeoPoint {
        let north = -point.y;
        let east = point.x;
        let latitude = self.origin.latitude + (north / EARTH_RADIUS_M).to_degrees();
        // Degenerate at the poles, where a meridian offset has no
        // east extent; keep the origin longitude instead of dividing
        // by zero.
        let longitude = if self.cos_origin_lat.abs() < f64::EPSILON {
            self.origin.longitude
        } else {
            self.origin.longitude
                + (east / (EARTH_RADIUS_M * self.cos_origin_lat)).to_degrees()
        };
        GeoPoint::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: GeoPoint = GeoPoint::new(47.397_742, 8.545_594);

    #[test]
    fn origin_projects_to_local_zero() {
        let plane = TangentPlane::new(ORIGIN);
        let local = plane.to_local(ORIGIN);
        assert!(local.x.abs() < 1e-9);
        assert!(local.y.abs() < 1e-9);
    }

    #[test]
    fn north_is_negative_y() {
        let plane = TangentPlane::new(ORIGIN);
        let north_of_origin = GeoPoint::new(ORIGIN.latitude + 0.001, ORIGIN.longitude);
        let local = plane.to_local(north_of_origin);
        assert!(local.y < 0.0, "north should map to -y, got y = {}", local.y);
        assert!(local.x.abs() < 1e-6);
    }

    #[test]
    fn east_is_positive_x() {
        let plane = TangentPlane::new(ORIGIN);
        let east_of_origin = GeoPoint::new(ORIGIN.latitude, ORIGIN.longitude + 0.001);
        let local = plane.to_local(east_of_origin);
        assert!(local.x > 0.0);
        assert!(local.y.abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let plane = TangentPlane::new(ORIGIN);
        let local = plane.to_local(GeoPoint::new(ORIGIN.latitude + 1.0, ORIGIN.longitude));
        let metres = -local.y;
        assert!(
            (metres - 111_194.9).abs() < 100.0,
            "1 degree latitude = {metres} m",
        );
    }

    #[test]
    fn round_trip_within_tolerance() {
        let plane = TangentPlane::new(ORIGIN);
        // Roughly 10 km offsets in both axes.
        let geo = GeoPoint::new(ORIGIN.latitude + 0.09, ORIGIN.longitude + 0.13);
        let recovered = plane.to_geodetic(plane.to_local(geo));
        assert!((recovered.latitude - geo.latitude).abs() < 1e-9);
        assert!((recovered.longitude - geo.longitude).abs() < 1e-9);
    }

    #[test]
    fn round_trip_from_local() {
        let plane = TangentPlane::new(ORIGIN);
        let local = Point::new(1500.0, -2500.0);
        let recovered = plane.to_local(plane.to_geodetic(local));
        assert!(recovered.distance(local) < 1e-6);
    }

    #[test]
    fn polar_origin_does_not_divide_by_zero() {
        let plane = TangentPlane::new(GeoPoint::new(90.0, 0.0));
        let geo = plane.to_geodetic(Point::new(100.0, 0.0));
        assert!(geo.longitude.is_finite());
        assert!(geo.latitude.is_finite());
    }
}
