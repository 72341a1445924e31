// crates/rubric-gate-core/src/lib.rs
// ============================================================================
// Module: Rubric Gate Core Library
// Description: Public API surface for the Rubric Gate core.
// Purpose: Expose the marking engine, access gate, and shared rubric types.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Rubric Gate core marks short prompt-writing submissions against a fixed
//! Role / Task / Context / Format rubric and guards the marker behind a
//! time-bounded session issued for a shared access code. Both halves are pure:
//! hosts supply the clock, the configuration, and the transport.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use runtime::AccessGate;
pub use runtime::GateConfig;
pub use runtime::GateError;
pub use runtime::MarkingConfig;
pub use runtime::MarkingEngine;
pub use runtime::SessionClaims;
pub use runtime::SessionRejection;
pub use runtime::SessionToken;
pub use runtime::check_code;
