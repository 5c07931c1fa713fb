//! Logging abstraction
//!
//! All diagnostics go through the `log` facade. Binaries and tests call
//! [`init`] once; repeated calls are harmless.
//!
//! The `log_*!` macros mirror the `log` macros and pin the target to this
//! crate so consumers can filter with `RUST_LOG=fieldtrace=debug`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "fieldtrace=info";

/// Initialize `env_logger` from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize `env_logger` with an explicit fallback filter
///
/// `RUST_LOG` still wins when it is set. Only the first call has any effect.
pub fn init_with_filter(filter: &str) {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(filter);
        // Another logger may already be installed by the host application
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .try_init();
    });
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ::log::info!(target: "fieldtrace", $($arg)*)
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ::log::warn!(target: "fieldtrace", $($arg)*)
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ::log::debug!(target: "fieldtrace", $($arg)*)
    };
}

/// Log a trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        ::log::trace!(target: "fieldtrace", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_with_filter("fieldtrace=trace");
        init();
        crate::log_info!("logger initialized {}", 1);
        crate::log_trace!("trace level message");
    }
}
