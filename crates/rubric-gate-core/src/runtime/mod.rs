// crates/rubric-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Rubric Gate Runtime
// Description: Marking engine and access gate implementations.
// Purpose: Host the two decision-making components of Rubric Gate.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The runtime holds the two stateless components: [`MarkingEngine`] maps
//! submission text to a [`crate::Verdict`], and [`AccessGate`] converts the
//! shared access code into signed, time-bounded session tokens.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod gate;
pub mod marker;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use gate::AccessGate;
pub use gate::DEFAULT_MAX_CODE_CHARS;
pub use gate::DEFAULT_SESSION_TTL_MINUTES;
pub use gate::GateConfig;
pub use gate::GateError;
pub use gate::SessionClaims;
pub use gate::SessionRejection;
pub use gate::SessionToken;
pub use gate::check_code;
pub use marker::DEFAULT_MAX_ANSWER_CHARS;
pub use marker::MarkingConfig;
pub use marker::MarkingEngine;
