// crates/rubric-gate-core/src/core/verdict.rs
// ============================================================================
// Module: Marking Verdicts
// Description: Gated and full verdict payloads returned by the marker.
// Purpose: Encode the two mutually exclusive verdict shapes in one type.
// Dependencies: serde, crate::core::{feedback, rubric}
// ============================================================================

//! ## Overview
//! A [`Verdict`] always carries `gated`, `wordCount`, and `message`. The rubric
//! half lives in an optional [`RubricReport`] that is flattened into the same
//! JSON object, so a gated verdict has no way to carry a score, strengths,
//! tags, grid, or reference texts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::feedback;
use crate::core::rubric::RubricDimension;
use crate::core::rubric::RubricSignal;

// ============================================================================
// SECTION: Tags and Grid
// ============================================================================

/// Binary status carried by a rubric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    /// The dimension is present.
    Ok,
    /// The dimension is missing.
    Bad,
}

impl TagStatus {
    /// Maps a detector outcome onto a tag status.
    #[must_use]
    pub const fn from_present(present: bool) -> Self {
        if present { Self::Ok } else { Self::Bad }
    }
}

/// Status column of a grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridStatus {
    /// The dimension is present.
    #[serde(rename = "✓ Secure")]
    Secure,
    /// The dimension is missing.
    #[serde(rename = "✗ Missing")]
    Missing,
}

impl GridStatus {
    /// Maps a detector outcome onto a grid status.
    #[must_use]
    pub const fn from_present(present: bool) -> Self {
        if present { Self::Secure } else { Self::Missing }
    }
}

/// One rubric tag: label plus binary status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RubricTag {
    /// Dimension label.
    pub label: &'static str,
    /// Satisfied or not.
    pub status: TagStatus,
}

/// One rubric grid row: label, status, and a confirmation or remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    /// Dimension label.
    pub label: &'static str,
    /// Satisfied or not.
    pub status: GridStatus,
    /// Confirmation when satisfied, remediation hint otherwise.
    pub detail: &'static str,
}

// ============================================================================
// SECTION: Rubric Report
// ============================================================================

/// The scored half of a full verdict.
///
/// # Invariants
/// - `tags` and `grid` hold exactly four entries in Role/Task/Context/Format order.
/// - `strengths` holds at most [`feedback::MAX_STRENGTHS`] entries.
/// - Every field is derived from one [`RubricSignal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricReport {
    /// Step-function score: 4, 6, 8, or 10.
    score: u8,
    /// Up to three affirmations.
    strengths: Vec<&'static str>,
    /// Four tags in fixed dimension order.
    tags: Vec<RubricTag>,
    /// Four grid rows in fixed dimension order.
    grid: Vec<GridRow>,
    /// Canned framework guidance.
    framework_text: String,
    /// Canned exemplar answer.
    model_answer: String,
}

impl RubricReport {
    /// Projects a rubric signal into score, strengths, tags, and grid.
    #[must_use]
    pub fn from_signal(signal: RubricSignal, framework_text: &str, model_answer: &str) -> Self {
        let present = signal.present_count();
        let mut strengths: Vec<&'static str> = RubricDimension::ALL
            .iter()
            .filter(|dimension| signal.get(**dimension))
            .map(|dimension| feedback::strength(*dimension))
            .collect();
        if strengths.len() < 2 {
            strengths.push(feedback::STRENGTH_FILLER);
        }
        strengths.truncate(feedback::MAX_STRENGTHS);

        let tags = RubricDimension::ALL
            .iter()
            .map(|dimension| RubricTag {
                label: dimension.label(),
                status: TagStatus::from_present(signal.get(*dimension)),
            })
            .collect();
        let grid = RubricDimension::ALL
            .iter()
            .map(|dimension| {
                let present = signal.get(*dimension);
                GridRow {
                    label: dimension.label(),
                    status: GridStatus::from_present(present),
                    detail: if present {
                        feedback::grid_confirmation(*dimension)
                    } else {
                        feedback::grid_remediation(*dimension)
                    },
                }
            })
            .collect();

        Self {
            score: feedback::score_for_present_count(present),
            strengths,
            tags,
            grid,
            framework_text: framework_text.to_string(),
            model_answer: model_answer.to_string(),
        }
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Returns the strengths list.
    #[must_use]
    pub fn strengths(&self) -> &[&'static str] {
        &self.strengths
    }

    /// Returns the four tags.
    #[must_use]
    pub fn tags(&self) -> &[RubricTag] {
        &self.tags
    }

    /// Returns the four grid rows.
    #[must_use]
    pub fn grid(&self) -> &[GridRow] {
        &self.grid
    }

    /// Returns the framework guidance text.
    #[must_use]
    pub fn framework_text(&self) -> &str {
        &self.framework_text
    }

    /// Returns the model answer text.
    #[must_use]
    pub fn model_answer(&self) -> &str {
        &self.model_answer
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Marker output for one submission.
///
/// # Invariants
/// - `gated` is true exactly when `rubric` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// True when the submission was below the word-count gate.
    gated: bool,
    /// Whitespace-delimited word count of the (truncated) submission.
    word_count: usize,
    /// Summary or gating message.
    message: String,
    /// Scored rubric fields, absent for gated verdicts.
    #[serde(flatten)]
    rubric: Option<RubricReport>,
}

impl Verdict {
    /// Builds a gated verdict.
    #[must_use]
    pub const fn gated(word_count: usize, message: String) -> Self {
        Self {
            gated: true,
            word_count,
            message,
            rubric: None,
        }
    }

    /// Builds a full verdict from a rubric report.
    #[must_use]
    pub fn full(word_count: usize, message: &str, rubric: RubricReport) -> Self {
        Self {
            gated: false,
            word_count,
            message: message.to_string(),
            rubric: Some(rubric),
        }
    }

    /// Returns true for the gated shape.
    #[must_use]
    pub const fn is_gated(&self) -> bool {
        self.gated
    }

    /// Returns the word count.
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Returns the summary or gating message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the rubric report for full verdicts.
    #[must_use]
    pub const fn rubric(&self) -> Option<&RubricReport> {
        self.rubric.as_ref()
    }

    /// Returns the score for full verdicts.
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.rubric.as_ref().map(RubricReport::score)
    }
}
