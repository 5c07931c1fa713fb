//! Trait abstractions for platform services.
//!
//! - Trait definitions have no feature gates
//! - Mock implementations are always available for host testing

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
