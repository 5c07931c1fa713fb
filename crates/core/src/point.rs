//! Captured point type
//!
//! `GeoPoint` is a single latitude/longitude fix together with its 1-based
//! position in the owning capture sequence.

/// One captured GPS fix within an ordered sequence
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
    /// 1-based sequence index, 0 while the point is not owned by a sequence
    pub order: u32,
}

impl GeoPoint {
    /// Create an unordered point (order 0)
    ///
    /// Sessions assign the real order when the point is appended.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            order: 0,
        }
    }

    /// Create a point with an explicit sequence index
    pub fn with_order(latitude: f64, longitude: f64, order: u32) -> Self {
        Self {
            latitude,
            longitude,
            order,
        }
    }

    /// Same coordinates, different sequence index
    pub fn reordered(self, order: u32) -> Self {
        Self { order, ..self }
    }

    /// True if both points share the same coordinates, ignoring `order`
    pub fn same_position(&self, other: &GeoPoint) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_is_unordered() {
        let p = GeoPoint::new(35.7, 139.6);
        assert_eq!(p.order, 0);
        assert_eq!(p.latitude, 35.7);
        assert_eq!(p.longitude, 139.6);
    }

    #[test]
    fn test_reordered_keeps_coordinates() {
        let p = GeoPoint::new(-33.7, -151.2).reordered(4);
        assert_eq!(p.order, 4);
        assert_eq!(p.latitude, -33.7);
        assert_eq!(p.longitude, -151.2);
    }

    #[test]
    fn test_same_position_ignores_order() {
        let a = GeoPoint::with_order(1.0, 2.0, 1);
        let b = GeoPoint::with_order(1.0, 2.0, 7);
        let c = GeoPoint::with_order(1.0, 2.5, 1);
        assert!(a.same_position(&b));
        assert!(!a.same_position(&c));
        assert_ne!(a, b);
    }
}
