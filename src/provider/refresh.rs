//! Idle position refresh
//!
//! While no capture is in progress, a background task keeps a "current
//! position" fresh for display. It polls every `idle_poll_interval_ms`,
//! accepting cached fixes up to `idle_max_age_ms` old, and publishes the
//! latest outcome through a watch channel. Ticks that land while the shared
//! [`CaptureGuard`] reports a capture in flight are skipped.

use std::sync::Arc;

use fieldtrace_core::GeoPoint;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{CaptureGuard, GeoSampleProvider};
use crate::config::CaptureConfig;
use crate::error::GeoError;

/// Latest idle refresh outcome, `None` until the first request completes
pub type RefreshOutcome = Option<Result<GeoPoint, GeoError>>;

/// Handle to a running idle refresh task.
///
/// Dropping the handle stops the task; a request still in flight is
/// discarded.
#[derive(Debug)]
pub struct IdleRefresh {
    receiver: watch::Receiver<RefreshOutcome>,
    task: JoinHandle<()>,
}

impl IdleRefresh {
    /// Most recent outcome without waiting
    pub fn latest(&self) -> RefreshOutcome {
        *self.receiver.borrow()
    }

    /// Wait for the next published outcome
    ///
    /// Returns `None` once the task has stopped.
    pub async fn next(&mut self) -> RefreshOutcome {
        self.receiver.changed().await.ok()?;
        *self.receiver.borrow_and_update()
    }

    /// Another receiver for the same stream of outcomes
    pub fn subscribe(&self) -> watch::Receiver<RefreshOutcome> {
        self.receiver.clone()
    }

    pub fn stop(self) {
        // Drop aborts the task
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for IdleRefresh {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `provider` in the background
///
/// Must be called from within a tokio runtime. Failures are published like
/// fixes and never retried early; the next tick simply asks again. Pass a
/// clone of the call site's capture guard so idle polls yield to captures.
pub fn spawn_idle_refresh<P>(
    provider: Arc<P>,
    guard: CaptureGuard,
    config: CaptureConfig,
) -> IdleRefresh
where
    P: GeoSampleProvider + ?Sized + 'static,
{
    let (sender, receiver) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.idle_poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if guard.is_capturing() {
                crate::log_trace!("capture in flight, skipping idle refresh");
                continue;
            }

            let request = provider.request_fix(config.capture_timeout_ms, config.idle_max_age_ms);
            let outcome = match tokio::time::timeout(config.capture_timeout(), request).await {
                Ok(outcome) => outcome,
                Err(_elapsed) => Err(GeoError::Timeout),
            };
            if let Err(e) = &outcome {
                crate::log_warn!("idle position refresh failed: {}", e);
            }

            if sender.send(Some(outcome)).is_err() {
                crate::log_debug!("idle refresh has no receivers, stopping");
                break;
            }
        }
    });

    IdleRefresh { receiver, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_publishes_fixes_with_idle_max_age() {
        let provider = Arc::new(MockProvider::with_fixes([
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
        ]));
        let config = CaptureConfig::default();
        let mut refresh = spawn_idle_refresh(provider.clone(), CaptureGuard::new(), config);

        assert_eq!(refresh.next().await, Some(Ok(GeoPoint::new(1.0, 1.0))));
        assert_eq!(refresh.next().await, Some(Ok(GeoPoint::new(2.0, 2.0))));
        assert_eq!(refresh.latest(), Some(Ok(GeoPoint::new(2.0, 2.0))));
        assert_eq!(provider.requests()[0], (10_000, 5_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_interval() {
        let provider = Arc::new(MockProvider::with_fixes([
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
        ]));
        let mut refresh =
            spawn_idle_refresh(provider.clone(), CaptureGuard::new(), CaptureConfig::default());

        let start = tokio::time::Instant::now();
        refresh.next().await;
        refresh.next().await;
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_published() {
        let provider = Arc::new(MockProvider::new());
        let mut refresh =
            spawn_idle_refresh(provider, CaptureGuard::new(), CaptureConfig::default());
        assert_eq!(refresh.next().await, Some(Err(GeoError::Unavailable)));
        assert!(refresh.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let provider = Arc::new(MockProvider::with_fixes([GeoPoint::new(1.0, 1.0)]));
        let mut refresh =
            spawn_idle_refresh(provider.clone(), CaptureGuard::new(), CaptureConfig::default());
        refresh.next().await;
        let mut subscriber = refresh.subscribe();
        refresh.stop();

        // Sender is dropped with the aborted task
        assert!(subscriber.changed().await.is_err());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skips_ticks_while_capturing() {
        let provider = Arc::new(MockProvider::with_fixes([GeoPoint::new(1.0, 1.0)]));
        let guard = CaptureGuard::new();
        let in_flight = guard.begin().unwrap();
        let mut refresh =
            spawn_idle_refresh(provider.clone(), guard.clone(), CaptureConfig::default());

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert!(provider.requests().is_empty());
        assert_eq!(refresh.latest(), None);

        drop(in_flight);
        assert_eq!(refresh.next().await, Some(Ok(GeoPoint::new(1.0, 1.0))));
        assert_eq!(provider.requests().len(), 1);
    }
}
