//! Presentation helpers
//!
//! Converts raw meters and square meters into display units and builds map
//! deeplinks. The deeplink format is shared with existing link-opening code
//! and must not change.

use fieldtrace_core::GeoPoint;

use crate::measurement::FinalizedRecord;

const METERS_PER_KM: f64 = 1_000.0;
const SQ_METERS_PER_HECTARE: f64 = 10_000.0;

/// Decimal places in map deeplinks (~0.11 m at the equator)
const MAP_LINK_DECIMALS: usize = 6;

/// `"950.00 m"` below one kilometer, `"1.50 km"` at or above
pub fn format_distance(m: f64) -> String {
    if m < METERS_PER_KM {
        format!("{:.2} m", m)
    } else {
        format!("{:.2} km", m / METERS_PER_KM)
    }
}

/// `"9999.00 m²"` below one hectare, `"1.00 ha"` at or above
pub fn format_area(m2: f64) -> String {
    if m2 < SQ_METERS_PER_HECTARE {
        format!("{:.2} m²", m2)
    } else {
        format!("{:.2} ha", m2 / SQ_METERS_PER_HECTARE)
    }
}

/// Google Maps deeplink for a single coordinate
pub fn map_link(point: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps?q={:.prec$},{:.prec$}",
        point.latitude,
        point.longitude,
        prec = MAP_LINK_DECIMALS
    )
}

/// One-line summary of a finalized record
pub fn format_record_summary(record: &FinalizedRecord) -> String {
    match record {
        FinalizedRecord::Point(p) => format!("{}: {}", p.name(), map_link(p.position())),
        FinalizedRecord::Line(l) => format!("{}: {}", l.name(), format_distance(l.distance_m())),
        FinalizedRecord::Area(a) => format!(
            "{}: {} (perimeter {})",
            a.name(),
            format_area(a.area_m2()),
            format_distance(a.perimeter_m())
        ),
    }
}
