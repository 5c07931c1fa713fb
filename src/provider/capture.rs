//! On-demand capture
//!
//! A capture is one provider request followed by one `add_point`. The call
//! site owns a [`CaptureGuard`]; while a request is outstanding the guard
//! reports `is_capturing()` and any further capture through the same guard
//! fails with `CaptureInFlight`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fieldtrace_core::GeoPoint;

use super::GeoSampleProvider;
use crate::config::CaptureConfig;
use crate::error::{CaptureError, GeoError};
use crate::measurement::MeasurementSession;

/// Call-site "capture in flight" flag.
///
/// Clones share the flag, so a UI can hand one clone to the capture action
/// and keep another to grey out its button.
#[derive(Debug, Clone, Default)]
pub struct CaptureGuard {
    capturing: Arc<AtomicBool>,
}

impl CaptureGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::Acquire)
    }

    pub(super) fn begin(&self) -> Result<InFlight<'_>, CaptureError> {
        self.capturing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight { guard: self })
            .map_err(|_| CaptureError::CaptureInFlight)
    }
}

/// Clears the flag on drop, including when the capture future is dropped
pub(super) struct InFlight<'a> {
    guard: &'a CaptureGuard,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard.capturing.store(false, Ordering::Release);
    }
}

/// Request one fix under the guard, bounded by `capture_timeout_ms`
///
/// The fix is not added anywhere. Pair with `MeasurementSession::add_point`
/// when the session may be cancelled while the request is outstanding: a
/// closed session then rejects the late fix and nothing needs rolling back.
pub async fn request_sample<P>(
    provider: &P,
    guard: &CaptureGuard,
    config: &CaptureConfig,
) -> Result<GeoPoint, CaptureError>
where
    P: GeoSampleProvider + ?Sized,
{
    let _in_flight = guard.begin()?;

    let request = provider.request_fix(config.capture_timeout_ms, config.capture_max_age_ms);
    let outcome = match tokio::time::timeout(config.capture_timeout(), request).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => Err(GeoError::Timeout),
    };

    outcome.map_err(|e| {
        crate::log_warn!("position request failed: {}", e);
        CaptureError::Geo(e)
    })
}

/// Capture one fix and append it to `session`
///
/// A closed session, or a point session that already holds its fix, is
/// rejected before any request is made. Failed requests leave the session
/// untouched. Returns the point as stored, with its order.
pub async fn capture_into<P>(
    provider: &P,
    session: &mut MeasurementSession,
    guard: &CaptureGuard,
    config: &CaptureConfig,
) -> Result<GeoPoint, CaptureError>
where
    P: GeoSampleProvider + ?Sized,
{
    session.ensure_accepts_point()?;

    let fix = request_sample(provider, guard, config).await?;
    session.add_point(fix)?;

    // add_point just pushed, so the slice is non-empty
    Ok(session.points().last().copied().unwrap_or(fix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::provider::{MockFix, MockProvider};
    use std::time::Duration;

    #[tokio::test]
    async fn test_capture_appends_ordered_point() {
        let provider =
            MockProvider::with_fixes([GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.001)]);
        let guard = CaptureGuard::new();
        let config = CaptureConfig::default();
        let mut session = MeasurementSession::line("Track").unwrap();

        let first = capture_into(&provider, &mut session, &guard, &config).await.unwrap();
        let second = capture_into(&provider, &mut session, &guard, &config).await.unwrap();

        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
        assert_eq!(session.len(), 2);
        assert!(!guard.is_capturing());
        assert_eq!(provider.requests(), vec![(10_000, 0), (10_000, 0)]);
    }

    #[tokio::test]
    async fn test_failed_capture_adds_nothing() {
        let provider = MockProvider::new();
        provider.push_error(GeoError::PermissionDenied);
        let guard = CaptureGuard::new();
        let mut session = MeasurementSession::area("Plot").unwrap();

        let err = capture_into(&provider, &mut session, &guard, &CaptureConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::Geo(GeoError::PermissionDenied));
        assert!(session.is_empty());
        assert!(!guard.is_capturing());
        // No automatic retry
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_times_out() {
        let provider = MockProvider::new();
        provider.push(MockFix::Delayed(
            Duration::from_secs(30),
            Ok(GeoPoint::new(1.0, 1.0)),
        ));
        let guard = CaptureGuard::new();
        let mut session = MeasurementSession::line("Track").unwrap();

        let err = capture_into(&provider, &mut session, &guard, &CaptureConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::Geo(GeoError::Timeout));
        assert!(session.is_empty());
        assert!(!guard.is_capturing());
    }

    #[tokio::test]
    async fn test_closed_session_skips_request() {
        let provider = MockProvider::with_fixes([GeoPoint::new(1.0, 1.0)]);
        let guard = CaptureGuard::new();
        let mut session = MeasurementSession::line("Track").unwrap();
        session.cancel().unwrap();

        let err = capture_into(&provider, &mut session, &guard, &CaptureConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::Session(SessionError::SessionClosed));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reentrant_capture_rejected() {
        let provider = MockProvider::new();
        provider.push(MockFix::Delayed(
            Duration::from_secs(2),
            Ok(GeoPoint::new(1.0, 1.0)),
        ));
        let guard = CaptureGuard::new();
        let config = CaptureConfig::default();

        let first = request_sample(&provider, &guard, &config);
        let second = async {
            tokio::task::yield_now().await;
            assert!(guard.is_capturing());
            request_sample(&provider, &guard, &config).await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, Ok(GeoPoint::new(1.0, 1.0)));
        assert_eq!(second, Err(CaptureError::CaptureInFlight));
        assert!(!guard.is_capturing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_capture_releases_guard() {
        let provider = MockProvider::new();
        provider.push(MockFix::Delayed(
            Duration::from_secs(5),
            Ok(GeoPoint::new(1.0, 1.0)),
        ));
        let guard = CaptureGuard::new();
        let config = CaptureConfig::default();

        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            request_sample(&provider, &guard, &config),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!guard.is_capturing());
    }

    #[tokio::test]
    async fn test_late_fix_rejected_by_cancelled_session() {
        let provider = MockProvider::with_fixes([GeoPoint::new(1.0, 1.0)]);
        let guard = CaptureGuard::new();
        let mut session = MeasurementSession::area("Plot").unwrap();

        let fix = request_sample(&provider, &guard, &CaptureConfig::default())
            .await
            .unwrap();
        session.cancel().unwrap();
        assert_eq!(session.add_point(fix), Err(SessionError::SessionClosed));
    }

    #[tokio::test]
    async fn test_second_point_capture_makes_no_request() {
        let provider =
            MockProvider::with_fixes([GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)]);
        let guard = CaptureGuard::new();
        let config = CaptureConfig::default();
        let mut session = MeasurementSession::point("Gate").unwrap();

        capture_into(&provider, &mut session, &guard, &config).await.unwrap();
        let err = capture_into(&provider, &mut session, &guard, &config)
            .await
            .unwrap_err();

        assert_eq!(err, CaptureError::Session(SessionError::PointAlreadyCaptured));
        assert_eq!(provider.requests().len(), 1);
        assert_eq!(session.points()[0].latitude, 1.0);
    }
}
