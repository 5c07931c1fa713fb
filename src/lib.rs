//! fieldtrace - Field geodesy for survey capture
//!
//! Turns GPS fixes captured one at a time while a field agent walks a path or
//! a boundary into finalized point, line and area records.
//!
//! # Modules
//!
//! - [`measurement`]: Measurement kinds, the capture session state machine and
//!   finalized records
//! - [`collection`]: Finalized records plus derived totals, and a mutex-guarded
//!   shared wrapper
//! - [`format`]: Human-readable distances/areas and map deeplinks
//! - [`provider`]: GeoSample provider contract, capture controller and idle
//!   position refresh
//! - [`handoff`]: Hand-off of finalized records to a persistence collaborator
//! - [`config`]: Capture timing configuration
//! - [`traits`]: Clock abstraction used to stamp finalized records
//! - [`logging`]: Logger initialization and log macros
//!
//! The pure kernel (distances, perimeter, area) lives in `fieldtrace_core` and
//! is re-exported here.

pub mod logging;

pub mod collection;
pub mod config;
pub mod error;
pub mod format;
pub mod handoff;
pub mod measurement;
pub mod provider;
pub mod traits;

pub use fieldtrace_core::{
    haversine_distance, initial_bearing, path_length, polygon_area, polygon_perimeter, GeoPoint,
    LocalProjection, EARTH_RADIUS_M,
};

pub use collection::{Collection, SharedCollection, Totals};
pub use config::CaptureConfig;
pub use error::{CaptureError, CollectionError, ConfigError, GeoError, SessionError};
pub use format::{format_area, format_distance, format_record_summary, map_link};
pub use handoff::{submit_collection, MemorySink, RecordSink, ResponsePayload};
pub use measurement::{
    capture_location, FinalizedRecord, LocationPoint, MeasuredArea, MeasuredLine,
    MeasurementKind, MeasurementSession, RecordId, SegmentInfo, SessionState,
};
pub use provider::{
    capture_into, request_sample, spawn_idle_refresh, CaptureGuard, GeoSampleProvider, IdleRefresh,
    MockFix, MockProvider,
};
pub use traits::{Clock, MockClock, SystemClock};
