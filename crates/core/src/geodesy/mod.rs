//! Geodesy kernel
//!
//! Pure functions for measurements over captured fixes:
//!
//! - Great-circle distance and bearing (haversine, spherical Earth)
//! - Path length and closed-polygon perimeter
//! - Polygon area via local tangent-plane projection and the shoelace formula
//!
//! # Limitations
//!
//! Area uses a flat-earth approximation around the centroid and is intended
//! for field-plot-scale polygons. Longitude wraparound at +/-180 degrees and
//! polar coordinates are not handled specially.

mod area;
mod distance;

pub use area::{polygon_area, LocalProjection};
pub use distance::{haversine_distance, initial_bearing, path_length, polygon_perimeter};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub(crate) const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
pub(crate) const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;
