//! GeoSample provider plumbing
//!
//! The position source itself is an external collaborator. This module
//! defines the contract it must satisfy and the call-site logic around it:
//!
//! - [`GeoSampleProvider`]: one fix per request, async, with a timeout and a
//!   maximum accepted fix age
//! - [`capture_into`] / [`request_sample`]: on-demand capture guarded by a
//!   [`CaptureGuard`] so a capture button cannot fire twice
//! - [`spawn_idle_refresh`]: background polling for a "current position"
//!   display while no capture is in progress
//!
//! Nothing here retries a failed request; retry policy belongs to the caller.

mod capture;
mod mock;
mod refresh;

use async_trait::async_trait;
use fieldtrace_core::GeoPoint;

use crate::error::GeoError;

pub use capture::{capture_into, request_sample, CaptureGuard};
pub use mock::{MockFix, MockProvider};
pub use refresh::{spawn_idle_refresh, IdleRefresh, RefreshOutcome};

/// Source of single position fixes.
///
/// Implementations must be `Send + Sync` so one provider can serve both the
/// capture button and the idle refresh task.
#[async_trait]
pub trait GeoSampleProvider: Send + Sync {
    /// Request one fix.
    ///
    /// * `timeout_ms` - how long the platform may search for a fix
    /// * `max_age_ms` - oldest cached fix the caller accepts (0 = fresh only)
    ///
    /// The returned point is unordered (`order == 0`); sessions assign order.
    async fn request_fix(&self, timeout_ms: u64, max_age_ms: u64) -> Result<GeoPoint, GeoError>;
}
