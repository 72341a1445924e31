// crates/rubric-gate-core/src/core/mod.rs
// ============================================================================
// Module: Rubric Gate Core Types
// Description: Canonical rubric, verdict, task, text, and time primitives.
// Purpose: Provide stable, serializable types shared by the engine and hosts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the four rubric dimensions, the detector pattern data,
//! the verdict payload returned to callers, and the static task metadata.
//! These types are the canonical source for any derived API surface.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod feedback;
pub mod rubric;
pub mod task;
pub mod text;
pub mod time;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use rubric::DetectorSet;
pub use rubric::PhraseDetector;
pub use rubric::RubricDimension;
pub use rubric::RubricSignal;
pub use task::DEFAULT_FRAMEWORK_TEXT;
pub use task::DEFAULT_MAX_WORDS;
pub use task::DEFAULT_MIN_WORDS_GATE;
pub use task::DEFAULT_MODEL_ANSWER;
pub use task::DEFAULT_QUESTION_TEXT;
pub use task::DEFAULT_TEMPLATE_TEXT;
pub use task::TaskMetadata;
pub use text::clamp_chars;
pub use text::normalize_for_detection;
pub use text::word_count;
pub use time::UnixSeconds;
pub use verdict::GridRow;
pub use verdict::GridStatus;
pub use verdict::RubricReport;
pub use verdict::RubricTag;
pub use verdict::TagStatus;
pub use verdict::Verdict;
