// crates/rubric-gate-core/src/runtime/marker.rs
// ============================================================================
// Module: Marking Engine
// Description: Deterministic rubric marking of prompt-writing submissions.
// Purpose: Turn submission text into a gated or full verdict.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`MarkingEngine::mark`] is total and deterministic. Text is truncated,
//! word-counted, and gated first; detectors only run once the word count
//! reaches the configured threshold, so nothing rubric-derived can reach a
//! gated verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::feedback;
use crate::core::rubric::DetectorSet;
use crate::core::rubric::RubricSignal;
use crate::core::task::DEFAULT_FRAMEWORK_TEXT;
use crate::core::task::DEFAULT_MIN_WORDS_GATE;
use crate::core::task::DEFAULT_MODEL_ANSWER;
use crate::core::text::clamp_chars;
use crate::core::text::normalize_for_detection;
use crate::core::text::word_count;
use crate::core::verdict::RubricReport;
use crate::core::verdict::Verdict;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default maximum submission length in characters.
pub const DEFAULT_MAX_ANSWER_CHARS: usize = 6000;

/// Immutable marking configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkingConfig {
    /// Submissions with fewer words than this are gated.
    pub min_words_gate: usize,
    /// Submissions are truncated to this many characters before marking.
    pub max_answer_chars: usize,
    /// Framework guidance attached to full verdicts.
    pub framework_text: String,
    /// Model answer attached to full verdicts.
    pub model_answer: String,
    /// Rubric detectors.
    pub detectors: DetectorSet,
}

impl Default for MarkingConfig {
    fn default() -> Self {
        Self {
            min_words_gate: DEFAULT_MIN_WORDS_GATE,
            max_answer_chars: DEFAULT_MAX_ANSWER_CHARS,
            framework_text: DEFAULT_FRAMEWORK_TEXT.to_string(),
            model_answer: DEFAULT_MODEL_ANSWER.to_string(),
            detectors: DetectorSet::default(),
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Stateless rubric marker.
#[derive(Debug, Clone, Default)]
pub struct MarkingEngine {
    /// Marking configuration.
    config: MarkingConfig,
}

impl MarkingEngine {
    /// Builds an engine from configuration.
    #[must_use]
    pub const fn new(config: MarkingConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the word-count gate.
    #[must_use]
    pub const fn min_words_gate(&self) -> usize {
        self.config.min_words_gate
    }

    /// Marks a submission.
    #[must_use]
    pub fn mark(&self, text: &str) -> Verdict {
        let submission = clamp_chars(text, self.config.max_answer_chars);
        let words = word_count(submission);
        if words < self.config.min_words_gate {
            return Verdict::gated(words, feedback::gated_message(self.config.min_words_gate));
        }

        let signal = self.detect(submission);
        let report = RubricReport::from_signal(
            signal,
            &self.config.framework_text,
            &self.config.model_answer,
        );
        Verdict::full(words, feedback::summary_message(signal.present_count()), report)
    }

    /// Runs the rubric detectors without applying the word-count gate.
    #[must_use]
    pub fn detect(&self, text: &str) -> RubricSignal {
        self.config.detectors.detect(&normalize_for_detection(text))
    }
}
