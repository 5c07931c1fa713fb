//! Finalized measurement records
//!
//! Records are created exactly once, when a session finishes, and are never
//! mutated afterwards. They are plain data, ready to hand to persistence.
//! Deserialized records are checked against the same name and point-count
//! rules a finishing session enforces.

use std::fmt;

use chrono::{DateTime, Utc};
use fieldtrace_core::GeoPoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::validate_name;
use crate::error::SessionError;

/// Unique identifier for finalized records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single named location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointFields")]
pub struct LocationPoint {
    id: RecordId,
    name: String,
    latitude: f64,
    longitude: f64,
    captured_at: DateTime<Utc>,
}

impl LocationPoint {
    pub(crate) fn new(name: String, point: GeoPoint, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            name,
            latitude: point.latitude,
            longitude: point.longitude,
            captured_at,
        }
    }

    /// Copy with a new name; identity and capture time are kept
    pub(crate) fn renamed(&self, name: String) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// The location as an order-1 point
    pub fn position(&self) -> GeoPoint {
        GeoPoint::with_order(self.latitude, self.longitude, 1)
    }
}

/// An open path with its total great-circle length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineFields")]
pub struct MeasuredLine {
    id: RecordId,
    name: String,
    points: Vec<GeoPoint>,
    distance_m: f64,
    captured_at: DateTime<Utc>,
}

impl MeasuredLine {
    /// Caller guarantees `points.len() >= 2`
    pub(crate) fn new(
        name: String,
        points: Vec<GeoPoint>,
        distance_m: f64,
        captured_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(points.len() >= 2);
        Self {
            id: RecordId::new(),
            name,
            points,
            distance_m,
            captured_at,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Sum of consecutive segments, without a closing segment
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// A closed boundary with its area and perimeter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AreaFields")]
pub struct MeasuredArea {
    id: RecordId,
    name: String,
    points: Vec<GeoPoint>,
    area_m2: f64,
    perimeter_m: f64,
    captured_at: DateTime<Utc>,
}

impl MeasuredArea {
    /// Caller guarantees `points.len() >= 3`
    pub(crate) fn new(
        name: String,
        points: Vec<GeoPoint>,
        area_m2: f64,
        perimeter_m: f64,
        captured_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(points.len() >= 3);
        Self {
            id: RecordId::new(),
            name,
            points,
            area_m2,
            perimeter_m,
            captured_at,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Includes the closing segment back to the first point
    pub fn perimeter_m(&self) -> f64 {
        self.perimeter_m
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// Any finalized record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinalizedRecord {
    Point(LocationPoint),
    Line(MeasuredLine),
    Area(MeasuredArea),
}

impl FinalizedRecord {
    pub fn id(&self) -> RecordId {
        match self {
            Self::Point(p) => p.id(),
            Self::Line(l) => l.id(),
            Self::Area(a) => a.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Point(p) => p.name(),
            Self::Line(l) => l.name(),
            Self::Area(a) => a.name(),
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        match self {
            Self::Point(p) => p.captured_at(),
            Self::Line(l) => l.captured_at(),
            Self::Area(a) => a.captured_at(),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Area(_) => "area",
        }
    }

    pub fn as_point(&self) -> Option<&LocationPoint> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&MeasuredLine> {
        match self {
            Self::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_area(&self) -> Option<&MeasuredArea> {
        match self {
            Self::Area(a) => Some(a),
            _ => None,
        }
    }
}

impl From<LocationPoint> for FinalizedRecord {
    fn from(point: LocationPoint) -> Self {
        Self::Point(point)
    }
}

impl From<MeasuredLine> for FinalizedRecord {
    fn from(line: MeasuredLine) -> Self {
        Self::Line(line)
    }
}

impl From<MeasuredArea> for FinalizedRecord {
    fn from(area: MeasuredArea) -> Self {
        Self::Area(area)
    }
}

// --- Deserialization ---
//
// Wire forms mirror the records field for field and are validated on the way
// in, so a payload cannot yield a record a session would refuse to finish.

#[derive(Deserialize)]
struct PointFields {
    id: RecordId,
    name: String,
    latitude: f64,
    longitude: f64,
    captured_at: DateTime<Utc>,
}

impl TryFrom<PointFields> for LocationPoint {
    type Error = SessionError;

    fn try_from(fields: PointFields) -> Result<Self, Self::Error> {
        Ok(Self {
            id: fields.id,
            name: validate_name(&fields.name)?,
            latitude: fields.latitude,
            longitude: fields.longitude,
            captured_at: fields.captured_at,
        })
    }
}

#[derive(Deserialize)]
struct LineFields {
    id: RecordId,
    name: String,
    points: Vec<GeoPoint>,
    distance_m: f64,
    captured_at: DateTime<Utc>,
}

impl TryFrom<LineFields> for MeasuredLine {
    type Error = SessionError;

    fn try_from(fields: LineFields) -> Result<Self, Self::Error> {
        check_point_count(2, &fields.points)?;
        Ok(Self {
            id: fields.id,
            name: validate_name(&fields.name)?,
            points: fields.points,
            distance_m: fields.distance_m,
            captured_at: fields.captured_at,
        })
    }
}

#[derive(Deserialize)]
struct AreaFields {
    id: RecordId,
    name: String,
    points: Vec<GeoPoint>,
    area_m2: f64,
    perimeter_m: f64,
    captured_at: DateTime<Utc>,
}

impl TryFrom<AreaFields> for MeasuredArea {
    type Error = SessionError;

    fn try_from(fields: AreaFields) -> Result<Self, Self::Error> {
        check_point_count(3, &fields.points)?;
        Ok(Self {
            id: fields.id,
            name: validate_name(&fields.name)?,
            points: fields.points,
            area_m2: fields.area_m2,
            perimeter_m: fields.perimeter_m,
            captured_at: fields.captured_at,
        })
    }
}

fn check_point_count(required: usize, points: &[GeoPoint]) -> Result<(), SessionError> {
    if points.len() < required {
        return Err(SessionError::TooFewPoints {
            required,
            got: points.len(),
        });
    }
    Ok(())
}
