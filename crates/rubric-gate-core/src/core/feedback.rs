// crates/rubric-gate-core/src/core/feedback.rs
// ============================================================================
// Module: Marking Feedback Catalog
// Description: Canned messages, strengths, and grid hints for verdicts.
// Purpose: Map detector outcomes to the fixed learner-facing wording.
// Dependencies: crate::core::rubric
// ============================================================================

//! ## Overview
//! Every learner-facing string in a verdict comes from this catalog. The
//! helpers here are pure lookups keyed by a [`RubricDimension`] or by the
//! number of satisfied dimensions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::rubric::RubricDimension;

// ============================================================================
// SECTION: Summary Messages
// ============================================================================

/// Summary when all four dimensions are present.
pub const MESSAGE_EXCELLENT: &str = "Excellent – you’ve followed the prompt formula.";
/// Summary when two or three dimensions are present.
pub const MESSAGE_GOOD: &str = "Good – try adding audience or tone to strengthen further.";
/// Summary when at most one dimension is present.
pub const MESSAGE_NEEDS_IMPROVEMENT: &str =
    "Needs improvement – use the formula: role, task, context, format.";

/// Encouragement appended when fewer than two dimensions are present.
pub const STRENGTH_FILLER: &str =
    "You’ve started shaping the prompt — add the missing stages for more control.";

/// Maximum number of strengths returned to the caller.
pub const MAX_STRENGTHS: usize = 3;

/// Builds the gated message for a submission below `min_words` words.
#[must_use]
pub fn gated_message(min_words: usize) -> String {
    format!(
        "Please add to your answer.\nThis response is too short to demonstrate the full prompt \
         structure.\nAim for at least {min_words} words and include: role, task, context, and \
         format."
    )
}

/// Selects the summary message for `present` satisfied dimensions.
#[must_use]
pub const fn summary_message(present: usize) -> &'static str {
    match present {
        4 => MESSAGE_EXCELLENT,
        2 | 3 => MESSAGE_GOOD,
        _ => MESSAGE_NEEDS_IMPROVEMENT,
    }
}

/// Maps the number of satisfied dimensions onto the 4/6/8/10 scale.
#[must_use]
pub const fn score_for_present_count(present: usize) -> u8 {
    match present {
        4 => 10,
        3 => 8,
        2 => 6,
        _ => 4,
    }
}

// ============================================================================
// SECTION: Per-Dimension Wording
// ============================================================================

/// Affirmation shown when `dimension` is present.
#[must_use]
pub const fn strength(dimension: RubricDimension) -> &'static str {
    match dimension {
        RubricDimension::Role => "You clearly set a role for the AI.",
        RubricDimension::Task => "You specify what you want the AI to do.",
        RubricDimension::Context => "You include context about who/what the plan is for.",
        RubricDimension::Format => "You set useful formatting constraints for the output.",
    }
}

/// Grid confirmation shown when `dimension` is present.
#[must_use]
pub const fn grid_confirmation(dimension: RubricDimension) -> &'static str {
    match dimension {
        RubricDimension::Role => "Role is present.",
        RubricDimension::Task => "Task is present.",
        RubricDimension::Context => "Context is present.",
        RubricDimension::Format => "Format constraints are present.",
    }
}

/// Grid remediation hint shown when `dimension` is missing.
#[must_use]
pub const fn grid_remediation(dimension: RubricDimension) -> &'static str {
    match dimension {
        RubricDimension::Role => "Add a role (e.g., tour guide / travel planner).",
        RubricDimension::Task => "State what you want AI to produce.",
        RubricDimension::Context => "Add who it’s for / when / where / constraints.",
        RubricDimension::Format => "Add format details (bullets, costs, distances, timing, tone).",
    }
}
