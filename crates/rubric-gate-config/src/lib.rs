// crates/rubric-gate-config/src/lib.rs
// ============================================================================
// Module: Rubric Gate Config Library
// Description: Canonical config model, environment overrides, and validation.
// Purpose: Single source of truth for rubric-gate.toml semantics.
// Dependencies: rubric-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `rubric-gate-config` defines the configuration model for Rubric Gate. It
//! is built once at process start and converted into the immutable core
//! configs handed to the marking engine and access gate.
//!
//! Security posture: config inputs are untrusted and validation fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
