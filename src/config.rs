//! Capture timing configuration
//!
//! # Parameters
//!
//! - `capture_timeout_ms` - Deadline for an on-demand capture (default 10 s)
//! - `capture_max_age_ms` - Maximum cached-fix age for on-demand captures
//!   (default 0, always fresh)
//! - `idle_max_age_ms` - Maximum cached-fix age for background refreshes
//!   (default 5 s)
//! - `idle_poll_interval_ms` - Period of background refreshes (default 10 s)
//!
//! Missing fields take their defaults when loading from JSON. Every loaded
//! config is range-checked before use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// --- Defaults ---

const DEFAULT_CAPTURE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CAPTURE_MAX_AGE_MS: u64 = 0;
const DEFAULT_IDLE_MAX_AGE_MS: u64 = 5_000;
const DEFAULT_IDLE_POLL_INTERVAL_MS: u64 = 10_000;

// --- Ranges ---

const MIN_CAPTURE_TIMEOUT_MS: u64 = 1_000;
const MAX_CAPTURE_TIMEOUT_MS: u64 = 60_000;

const MAX_AGE_MS: u64 = 60_000;

const MIN_IDLE_POLL_INTERVAL_MS: u64 = 1_000;
const MAX_IDLE_POLL_INTERVAL_MS: u64 = 600_000;

/// Timing parameters for position capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Deadline for an on-demand capture in milliseconds
    pub capture_timeout_ms: u64,
    /// Maximum age of a cached fix accepted by on-demand captures
    pub capture_max_age_ms: u64,
    /// Maximum age of a cached fix accepted by idle refreshes
    pub idle_max_age_ms: u64,
    /// Period between idle refreshes in milliseconds
    pub idle_poll_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capture_timeout_ms: DEFAULT_CAPTURE_TIMEOUT_MS,
            capture_max_age_ms: DEFAULT_CAPTURE_MAX_AGE_MS,
            idle_max_age_ms: DEFAULT_IDLE_MAX_AGE_MS,
            idle_poll_interval_ms: DEFAULT_IDLE_POLL_INTERVAL_MS,
        }
    }
}

impl CaptureConfig {
    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "capture_timeout_ms",
            self.capture_timeout_ms,
            MIN_CAPTURE_TIMEOUT_MS,
            MAX_CAPTURE_TIMEOUT_MS,
        )?;
        check_range("capture_max_age_ms", self.capture_max_age_ms, 0, MAX_AGE_MS)?;
        check_range("idle_max_age_ms", self.idle_max_age_ms, 0, MAX_AGE_MS)?;
        check_range(
            "idle_poll_interval_ms",
            self.idle_poll_interval_ms,
            MIN_IDLE_POLL_INTERVAL_MS,
            MAX_IDLE_POLL_INTERVAL_MS,
        )?;
        Ok(())
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    pub fn idle_poll_interval(&self) -> Duration {
        Duration::from_millis(self.idle_poll_interval_ms)
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        crate::log_warn!("config {} = {} outside {}..={}", field, value, min, max);
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is outside {min}..={max}"),
        })
    }
}
