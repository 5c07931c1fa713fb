//! Scripted provider for tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fieldtrace_core::GeoPoint;

use super::GeoSampleProvider;
use crate::error::GeoError;

/// One scripted response
#[derive(Debug, Clone)]
pub enum MockFix {
    /// Resolve immediately
    Ready(Result<GeoPoint, GeoError>),
    /// Resolve after a delay (uses tokio time, so paused clocks apply)
    Delayed(Duration, Result<GeoPoint, GeoError>),
}

/// Provider that replays a queue of scripted responses.
///
/// Once the queue is exhausted every request fails with `Unavailable`.
///
/// # Example
///
/// ```
/// use fieldtrace::provider::MockProvider;
/// use fieldtrace::GeoPoint;
///
/// let provider = MockProvider::new();
/// provider.push_fix(GeoPoint::new(35.68, 139.76));
/// assert_eq!(provider.remaining(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<MockFix>>,
    requests: Mutex<Vec<(u64, u64)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-loaded with successful fixes
    pub fn with_fixes(fixes: impl IntoIterator<Item = GeoPoint>) -> Self {
        let provider = Self::new();
        for fix in fixes {
            provider.push_fix(fix);
        }
        provider
    }

    pub fn push(&self, response: MockFix) {
        lock(&self.script).push_back(response);
    }

    pub fn push_fix(&self, fix: GeoPoint) {
        self.push(MockFix::Ready(Ok(fix)));
    }

    pub fn push_error(&self, error: GeoError) {
        self.push(MockFix::Ready(Err(error)));
    }

    /// Scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }

    /// `(timeout_ms, max_age_ms)` of every request so far
    pub fn requests(&self) -> Vec<(u64, u64)> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl GeoSampleProvider for MockProvider {
    async fn request_fix(&self, timeout_ms: u64, max_age_ms: u64) -> Result<GeoPoint, GeoError> {
        lock(&self.requests).push((timeout_ms, max_age_ms));
        let next = lock(&self.script).pop_front();
        match next {
            Some(MockFix::Ready(result)) => result,
            Some(MockFix::Delayed(delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(GeoError::Unavailable),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
