//! Measurement capture
//!
//! A measurement starts as a named [`MeasurementSession`] that accumulates
//! ordered fixes. Finishing a session validates its point count, computes
//! derived metrics with the geodesy kernel, and yields an immutable
//! [`FinalizedRecord`].
//!
//! # Lifecycle
//!
//! ```text
//! start(kind) -> Naming --add_point--> Capturing --finish--> Finished
//!                  |  ^                   |  |
//!                  |  +--remove_last------+  +--cancel--> Cancelled
//!                  +--cancel--> Cancelled
//! ```
//!
//! No session is global: callers own the session value and pass it around by
//! reference.

mod kind;
mod record;
mod session;

pub use kind::MeasurementKind;
pub(crate) use kind::validate_name;
pub use record::{FinalizedRecord, LocationPoint, MeasuredArea, MeasuredLine, RecordId};
pub use session::{capture_location, MeasurementSession, SegmentInfo, SessionState};
