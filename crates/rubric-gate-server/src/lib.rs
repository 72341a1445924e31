// crates/rubric-gate-server/src/lib.rs
// ============================================================================
// Module: Rubric Gate Server
// Description: HTTP boundary for the access gate and marking engine.
// Purpose: Expose unlock, mark, and task metadata endpoints over axum.
// Dependencies: rubric-gate-core, rubric-gate-config, axum, tokio
// ============================================================================

//! ## Overview
//! The server wires configuration into an [`rubric_gate_core::AccessGate`] and a
//! [`rubric_gate_core::MarkingEngine`] and exposes them as JSON endpoints. The
//! session credential travels as a signed cookie; every request body is
//! untrusted and bounded by the configured body limit.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod clock;
pub mod cookie;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditEvent;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use clock::Clock;
pub use clock::SystemClock;
pub use cookie::SessionCookie;
pub use server::GateServer;
pub use server::ServerError;
pub use server::build_audit_sink;
