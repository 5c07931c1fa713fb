//! Polygon area over a local tangent plane
//!
//! Points are projected onto a flat plane centered on their arithmetic-mean
//! centroid using an equirectangular approximation, then integrated with the
//! shoelace formula. No geodesic correction is applied.

use libm::{cos, fabs};

use super::{DEG_TO_RAD, EARTH_RADIUS_M};
use crate::point::GeoPoint;

/// Equirectangular projection anchored at a centroid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalProjection {
    /// Centroid latitude in degrees
    pub origin_lat: f64,
    /// Centroid longitude in degrees
    pub origin_lon: f64,
    /// Meters per degree of longitude at the origin latitude
    meters_per_deg_lon: f64,
}

impl LocalProjection {
    /// Projection anchored at an explicit origin
    pub fn new(origin_lat: f64, origin_lon: f64) -> Self {
        Self {
            origin_lat,
            origin_lon,
            meters_per_deg_lon: DEG_TO_RAD * EARTH_RADIUS_M * cos(origin_lat * DEG_TO_RAD),
        }
    }

    /// Projection anchored at the arithmetic mean of all latitudes/longitudes
    ///
    /// Returns `None` for an empty slice.
    pub fn centered_on(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sum_lat, sum_lon) = points.iter().fold((0.0, 0.0), |(lat, lon), p| {
            (lat + p.latitude, lon + p.longitude)
        });
        Some(Self::new(sum_lat / n, sum_lon / n))
    }

    /// Planar `(x, y)` offset in meters from the origin (x east, y north)
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.longitude - self.origin_lon) * self.meters_per_deg_lon;
        let y = (point.latitude - self.origin_lat) * DEG_TO_RAD * EARTH_RADIUS_M;
        (x, y)
    }
}

/// Area of the implicitly closed polygon in square meters
///
/// Returns 0.0 for fewer than 3 points. The result is non-negative and does
/// not depend on winding direction or on which vertex the list starts at.
pub fn polygon_area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let projection = match LocalProjection::centered_on(points) {
        Some(projection) => projection,
        None => return 0.0,
    };

    let n = points.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = projection.project(points[i]);
        let (xj, yj) = projection.project(points[j]);
        twice_area += xi * yj - xj * yi;
    }

    fabs(twice_area) / 2.0
}
