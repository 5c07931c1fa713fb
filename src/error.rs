//! Error types
//!
//! Every error in this crate is recoverable by the caller: re-prompt, keep
//! capturing, retry, or cancel. The geodesy kernel itself never fails.

use crate::measurement::RecordId;

/// Errors raised by the measurement session state machine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Name was empty or whitespace-only
    #[error("Measurement name must not be empty")]
    InvalidName,

    /// Mutation attempted on a finished or cancelled session
    #[error("Session is closed")]
    SessionClosed,

    /// `finish()` called before the minimum point count was reached
    #[error("Too few points: {required} required, {got} captured")]
    TooFewPoints { required: usize, got: usize },

    /// A point session already holds its single fix
    #[error("Point already captured; finish or cancel the session")]
    PointAlreadyCaptured,
}

/// Outcomes of a failed position request
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Timed out waiting for a position fix")]
    Timeout,

    #[error("Position unavailable")]
    Unavailable,
}

/// Errors from the async capture path
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    /// A capture is already outstanding for this call site
    #[error("A capture is already in progress")]
    CaptureInFlight,
}

/// Errors from collection edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// Only location points can be renamed after finalization
    #[error("Record cannot be renamed: {0}")]
    NotRenameable(RecordId),

    /// A record with this id is already in the collection
    #[error("Duplicate record: {0}")]
    DuplicateId(RecordId),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors from loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
