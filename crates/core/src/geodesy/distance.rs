//! Great-circle distance utilities
//!
//! Pure functions for distances along captured sequences.

use libm::{atan2, cos, sin, sqrt};

use super::{DEG_TO_RAD, EARTH_RADIUS_M, RAD_TO_DEG};
use crate::point::GeoPoint;

/// Great-circle distance between two fixes using the Haversine formula
///
/// # Arguments
///
/// * `a`, `b` - Fixes in degrees; `order` is ignored
///
/// # Returns
///
/// Distance in meters. Symmetric, never negative, exactly 0.0 for coincident
/// points.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude * DEG_TO_RAD;
    let lat2_rad = b.latitude * DEG_TO_RAD;
    let delta_lat = (b.latitude - a.latitude) * DEG_TO_RAD;
    let delta_lon = (b.longitude - a.longitude) * DEG_TO_RAD;

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let h = sin_dlat * sin_dlat + cos(lat1_rad) * cos(lat2_rad) * sin_dlon * sin_dlon;
    // Rounding can push h a hair outside [0, 1] for near-antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * atan2(sqrt(h), sqrt(1.0 - h));

    EARTH_RADIUS_M * c
}

/// Initial bearing (forward azimuth) from `a` towards `b`
///
/// # Returns
///
/// Bearing in degrees, 0 to 360, true north. Coincident points yield 0.
pub fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude * DEG_TO_RAD;
    let lat2_rad = b.latitude * DEG_TO_RAD;
    let delta_lon = (b.longitude - a.longitude) * DEG_TO_RAD;

    let y = sin(delta_lon) * cos(lat2_rad);
    let x = cos(lat1_rad) * sin(lat2_rad) - sin(lat1_rad) * cos(lat2_rad) * cos(delta_lon);
    let bearing = atan2(y, x) * RAD_TO_DEG;
    let bearing = (bearing + 360.0) % 360.0;

    // -0.0 + 360.0 lands exactly on 360.0
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Sum of great-circle segments over consecutive pairs
///
/// Returns 0.0 for fewer than 2 points. No closing segment is included.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .fold(0.0, |acc, w| acc + haversine_distance(w[0], w[1]))
}

/// Path length plus the closing segment from the last point back to the first
///
/// Returns 0.0 for fewer than 2 points.
pub fn polygon_perimeter(points: &[GeoPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) if points.len() >= 2 => {
            path_length(points) + haversine_distance(last, first)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn test_haversine_one_degree_north() {
        // ~111km per degree of latitude
        let distance = haversine_distance(p(35.0, 139.0), p(36.0, 139.0));
        assert!((distance - 111_195.0).abs() < 10.0);
    }

    #[test]
    fn test_haversine_paris_london() {
        let paris = p(48.8566, 2.3522);
        let london = p(51.5074, -0.1278);
        let distance = haversine_distance(paris, london);
        assert!((distance - 343_000.0).abs() / 343_000.0 < 0.005);
    }

    #[test]
    fn test_haversine_identity() {
        for &(lat, lon) in &[(0.0, 0.0), (48.8566, 2.3522), (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(haversine_distance(p(lat, lon), p(lat, lon)), 0.0);
        }
    }

    #[test]
    fn test_haversine_symmetric() {
        let pairs = [
            (p(35.0, 139.0), p(36.5, 140.25)),
            (p(-33.7, -151.2), p(51.5, -0.12)),
            (p(0.0, 0.0), p(0.0, 0.001)),
            (p(10.0, 179.5), p(-10.0, -179.5)),
        ];
        for (a, b) in pairs {
            let ab = haversine_distance(a, b);
            let ba = haversine_distance(b, a);
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        let d = haversine_distance(p(0.0, 0.0), p(0.0, 180.0));
        let half_circumference = core::f64::consts::PI * EARTH_RADIUS_M;
        assert!((d - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let north = initial_bearing(p(35.0, 139.0), p(36.0, 139.0));
        assert!(north.abs() < 1.0 || (north - 360.0).abs() < 1.0);

        let east = initial_bearing(p(35.0, 139.0), p(35.0, 140.0));
        assert!((east - 90.0).abs() < 1.0);

        let south = initial_bearing(p(36.0, 139.0), p(35.0, 139.0));
        assert!((south - 180.0).abs() < 1.0);

        let west = initial_bearing(p(35.0, 140.0), p(35.0, 139.0));
        assert!((west - 270.0).abs() < 1.0);
    }

    #[test]
    fn test_bearing_in_range() {
        let b = initial_bearing(p(1.0, 1.0), p(1.0, 1.0));
        assert!((0.0..360.0).contains(&b));
    }

    #[test]
    fn test_path_length_short_inputs() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[p(1.0, 1.0)]), 0.0);
        assert_eq!(polygon_perimeter(&[]), 0.0);
        assert_eq!(polygon_perimeter(&[p(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let pts = [p(0.0, 0.0), p(0.0, 0.001), p(0.001, 0.001)];
        let expected =
            haversine_distance(pts[0], pts[1]) + haversine_distance(pts[1], pts[2]);
        assert!((path_length(&pts) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_adds_closing_segment() {
        let pts = [p(0.0, 0.0), p(0.0, 0.001), p(0.001, 0.001)];
        let closing = haversine_distance(pts[2], pts[0]);
        assert!((polygon_perimeter(&pts) - path_length(&pts) - closing).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_of_two_points_is_out_and_back() {
        let pts = [p(0.0, 0.0), p(0.0, 0.001)];
        assert!((polygon_perimeter(&pts) - 2.0 * path_length(&pts)).abs() < 1e-9);
    }
}
