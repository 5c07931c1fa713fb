//! Measurement session state machine
//!
//! A session owns the ordered fixes of one in-progress measurement. Only the
//! owner mutates it; the kernel is invoked on finish and, optionally, for live
//! metrics after every added point.

use fieldtrace_core::{
    haversine_distance, initial_bearing, path_length, polygon_area, polygon_perimeter, GeoPoint,
};

use super::kind::MeasurementKind;
use super::record::{FinalizedRecord, LocationPoint, MeasuredArea, MeasuredLine};
use crate::error::SessionError;
use crate::traits::{Clock, SystemClock};

/// Session lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Named, no points yet
    #[default]
    Naming,
    /// At least one point captured
    Capturing,
    /// Terminal: a record was produced
    Finished,
    /// Terminal: discarded without a record
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// Length and heading of the most recent segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentInfo {
    pub distance_m: f64,
    /// Initial bearing, 0 to 360 degrees from true north
    pub bearing_deg: f64,
}

/// One in-progress, named, ordered capture
#[derive(Debug)]
pub struct MeasurementSession {
    kind: MeasurementKind,
    points: Vec<GeoPoint>,
    state: SessionState,
}

impl MeasurementSession {
    /// Start a session; the name is trimmed and must not be empty
    pub fn start(kind: MeasurementKind) -> Result<Self, SessionError> {
        let kind = kind.normalized()?;
        crate::log_debug!("{} session '{}' started", kind.label(), kind.name());
        Ok(Self {
            kind,
            points: Vec::new(),
            state: SessionState::Naming,
        })
    }

    pub fn point(name: impl AsRef<str>) -> Result<Self, SessionError> {
        Self::start(MeasurementKind::point(name)?)
    }

    pub fn line(name: impl AsRef<str>) -> Result<Self, SessionError> {
        Self::start(MeasurementKind::line(name)?)
    }

    pub fn area(name: impl AsRef<str>) -> Result<Self, SessionError> {
        Self::start(MeasurementKind::area(name)?)
    }

    pub fn kind(&self) -> &MeasurementKind {
        &self.kind
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Captured points, `order` 1..=len
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a fix, assigning `order = len + 1`
    ///
    /// Point sessions hold a single fix. Once it is captured, further samples
    /// are rejected with `PointAlreadyCaptured` until the fix is undone.
    pub fn add_point(&mut self, sample: GeoPoint) -> Result<(), SessionError> {
        self.ensure_accepts_point()?;
        let order = self.points.len() as u32 + 1;
        self.points.push(sample.reordered(order));
        self.state = SessionState::Capturing;

        crate::log_trace!(
            "'{}' point {} at ({:.6}, {:.6})",
            self.kind.name(),
            order,
            sample.latitude,
            sample.longitude
        );
        Ok(())
    }

    /// Undo the most recent fix
    ///
    /// Returns the removed point, or `None` when there was nothing to undo.
    pub fn remove_last_point(&mut self) -> Result<Option<GeoPoint>, SessionError> {
        self.ensure_open()?;

        let removed = self.points.pop();
        if self.points.is_empty() {
            self.state = SessionState::Naming;
        }
        if let Some(point) = removed {
            crate::log_debug!("'{}' undo point {}", self.kind.name(), point.order);
        }
        Ok(removed)
    }

    /// Finalize using the system clock
    pub fn finish(&mut self) -> Result<FinalizedRecord, SessionError> {
        self.finish_with(&SystemClock)
    }

    /// Validate the point count, compute metrics and close the session
    ///
    /// On a validation error the session stays open so capture can continue.
    pub fn finish_with<C: Clock + ?Sized>(
        &mut self,
        clock: &C,
    ) -> Result<FinalizedRecord, SessionError> {
        self.ensure_open()?;

        let required = self.kind.min_points();
        let got = self.points.len();
        if got < required {
            return Err(SessionError::TooFewPoints { required, got });
        }

        let captured_at = clock.now();
        let name = self.kind.name().to_string();
        let record: FinalizedRecord = match &self.kind {
            MeasurementKind::Point { .. } => {
                LocationPoint::new(name, self.points[0], captured_at).into()
            }
            MeasurementKind::Line { .. } => {
                let distance_m = path_length(&self.points);
                MeasuredLine::new(name, self.points.clone(), distance_m, captured_at).into()
            }
            MeasurementKind::Area { .. } => {
                let area_m2 = polygon_area(&self.points);
                let perimeter_m = polygon_perimeter(&self.points);
                MeasuredArea::new(name, self.points.clone(), area_m2, perimeter_m, captured_at)
                    .into()
            }
        };

        self.state = SessionState::Finished;
        log_finished(&record);
        Ok(record)
    }

    /// Discard the session and its points
    ///
    /// Cancelling twice is a no-op; cancelling a finished session is an error.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Cancelled => Ok(()),
            SessionState::Finished => Err(SessionError::SessionClosed),
            SessionState::Naming | SessionState::Capturing => {
                crate::log_info!(
                    "{} session '{}' cancelled with {} points",
                    self.kind.label(),
                    self.kind.name(),
                    self.points.len()
                );
                self.points.clear();
                self.state = SessionState::Cancelled;
                Ok(())
            }
        }
    }

    /// Running path length; 0.0 for point sessions
    pub fn live_distance(&self) -> f64 {
        match self.kind {
            MeasurementKind::Point { .. } => 0.0,
            _ => path_length(&self.points),
        }
    }

    /// Running polygon area; 0.0 unless this is an area session
    pub fn live_area(&self) -> f64 {
        match self.kind {
            MeasurementKind::Area { .. } => polygon_area(&self.points),
            _ => 0.0,
        }
    }

    /// Running closed perimeter; 0.0 unless this is an area session
    pub fn live_perimeter(&self) -> f64 {
        match self.kind {
            MeasurementKind::Area { .. } => polygon_perimeter(&self.points),
            _ => 0.0,
        }
    }

    /// Distance and bearing from the second-to-last to the last point
    pub fn last_segment(&self) -> Option<SegmentInfo> {
        match self.points.as_slice() {
            [.., a, b] => Some(SegmentInfo {
                distance_m: haversine_distance(*a, *b),
                bearing_deg: initial_bearing(*a, *b),
            }),
            _ => None,
        }
    }

    /// Whether `add_point` would accept a sample right now
    pub fn ensure_accepts_point(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if matches!(self.kind, MeasurementKind::Point { .. }) && !self.points.is_empty() {
            return Err(SessionError::PointAlreadyCaptured);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.state.is_terminal() {
            Err(SessionError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

fn log_finished(record: &FinalizedRecord) {
    match record {
        FinalizedRecord::Point(p) => crate::log_info!(
            "point '{}' finished at ({:.6}, {:.6})",
            p.name(),
            p.latitude(),
            p.longitude()
        ),
        FinalizedRecord::Line(l) => crate::log_info!(
            "line '{}' finished: {} points, {:.2} m",
            l.name(),
            l.points().len(),
            l.distance_m()
        ),
        FinalizedRecord::Area(a) => crate::log_info!(
            "area '{}' finished: {} points, {:.2} m2, perimeter {:.2} m",
            a.name(),
            a.points().len(),
            a.area_m2(),
            a.perimeter_m()
        ),
    }
}

/// Capture a single named location in one step
pub fn capture_location(
    name: impl AsRef<str>,
    sample: GeoPoint,
) -> Result<FinalizedRecord, SessionError> {
    let mut session = MeasurementSession::point(name)?;
    session.add_point(sample)?;
    session.finish()
}
