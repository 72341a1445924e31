// crates/rubric-gate-core/src/core/time.rs
// ============================================================================
// Module: Rubric Gate Time Model
// Description: Epoch-second timestamps for session expiry decisions.
// Purpose: Keep session validity deterministic by making "now" explicit.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The access gate compares token expiry against a caller-supplied instant.
//! The core never reads wall-clock time directly; hosts convert their clock
//! into [`UnixSeconds`] at the request boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Seconds since the unix epoch.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - Monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixSeconds(i64);

impl UnixSeconds {
    /// Wraps a raw epoch-seconds value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns this instant advanced by `minutes`, saturating at the numeric bound.
    #[must_use]
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(i64::from(minutes).saturating_mul(60)))
    }
}
