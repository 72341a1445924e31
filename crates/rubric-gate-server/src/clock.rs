// crates/rubric-gate-server/src/clock.rs
// ============================================================================
// Module: Host Clock
// Description: Wall-clock source supplied to the access gate.
// Purpose: Keep time reads at the host boundary so handlers stay testable.
// Dependencies: rubric-gate-core
// ============================================================================

//! ## Overview
//! The core never reads the clock. Handlers ask a [`Clock`] for the current
//! Unix time and pass it into the gate explicitly.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rubric_gate_core::UnixSeconds;

/// Source of the current Unix time.
pub trait Clock: Send + Sync {
    /// Returns the current time in whole seconds.
    fn now(&self) -> UnixSeconds;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixSeconds {
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
        UnixSeconds::new(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}
