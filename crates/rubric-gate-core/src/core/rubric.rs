// crates/rubric-gate-core/src/core/rubric.rs
// ============================================================================
// Module: Rubric Dimensions and Detectors
// Description: The four rubric dimensions and their phrase detectors.
// Purpose: Derive the four rubric booleans from normalized submission text.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each rubric dimension owns an ordered list of phrase patterns. A detector
//! is satisfied when any pattern occurs anywhere in the normalized text; the
//! match is substring based, so coincidental matches count. Pattern lists are
//! plain data so the rubric can be retuned without touching scoring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Default Pattern Lists
// ============================================================================

/// Role assignment and persona framing phrases.
pub const DEFAULT_ROLE_PATTERNS: &[&str] = &["role:", "you are a", "act as", "as a "];

/// Action verbs signalling what the AI should do.
pub const DEFAULT_TASK_PATTERNS: &[&str] =
    &["task:", "give me", "create", "produce", "generate", "write", "build", "plan"];

/// Audience and situational markers.
pub const DEFAULT_CONTEXT_PATTERNS: &[&str] = &[
    "context:",
    "i am",
    "we are",
    "for me",
    "for a",
    "audience",
    "staff",
    "team",
    "colleagues",
    "workplace",
    "social",
    "event",
    "budget",
    "london",
    "accessibility",
    "dietary",
    "remote",
];

/// Structure, tone, and constraint markers.
pub const DEFAULT_FORMAT_PATTERNS: &[&str] = &[
    "format:",
    "bullet",
    "table",
    "include",
    "ensure",
    "constraints",
    "tone",
    "structure",
    "distance",
    "fees",
    "costs",
    "how long",
];

// ============================================================================
// SECTION: Dimensions
// ============================================================================

/// One of the four structural facets of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricDimension {
    /// Who the AI is, or which role it should adopt.
    Role,
    /// What the AI is asked to do.
    Task,
    /// Who the output is for and the surrounding situation.
    Context,
    /// How the output should be structured and constrained.
    Format,
}

impl RubricDimension {
    /// All dimensions in their fixed presentation order.
    pub const ALL: [Self; 4] = [Self::Role, Self::Task, Self::Context, Self::Format];

    /// Returns the display label used in tags and grid rows.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Task => "Task",
            Self::Context => "Context",
            Self::Format => "Format",
        }
    }

    /// Returns the built-in pattern list for this dimension.
    #[must_use]
    pub const fn default_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Role => DEFAULT_ROLE_PATTERNS,
            Self::Task => DEFAULT_TASK_PATTERNS,
            Self::Context => DEFAULT_CONTEXT_PATTERNS,
            Self::Format => DEFAULT_FORMAT_PATTERNS,
        }
    }
}

// ============================================================================
// SECTION: Signal
// ============================================================================

/// The four independent detector outcomes for one submission.
///
/// # Invariants
/// - Score, message, strengths, tags, and grid are all projections of these
///   four booleans; nothing else feeds them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RubricSignal {
    /// Role detector outcome.
    pub has_role: bool,
    /// Task detector outcome.
    pub has_task: bool,
    /// Context detector outcome.
    pub has_context: bool,
    /// Format detector outcome.
    pub has_format: bool,
}

impl RubricSignal {
    /// Returns the detector outcome for `dimension`.
    #[must_use]
    pub const fn get(&self, dimension: RubricDimension) -> bool {
        match dimension {
            RubricDimension::Role => self.has_role,
            RubricDimension::Task => self.has_task,
            RubricDimension::Context => self.has_context,
            RubricDimension::Format => self.has_format,
        }
    }

    /// Returns how many of the four detectors fired (0 through 4).
    #[must_use]
    pub fn present_count(&self) -> usize {
        RubricDimension::ALL.iter().filter(|dimension| self.get(**dimension)).count()
    }
}

// ============================================================================
// SECTION: Detectors
// ============================================================================

/// Substring detector for a single rubric dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseDetector {
    /// Lower-cased patterns, checked in order.
    patterns: Vec<String>,
}

impl PhraseDetector {
    /// Builds a detector, lower-casing every pattern.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns.into_iter().map(|pattern| pattern.as_ref().to_lowercase()).collect(),
        }
    }

    /// Builds the detector carrying the built-in patterns for `dimension`.
    #[must_use]
    pub fn with_defaults(dimension: RubricDimension) -> Self {
        Self::new(dimension.default_patterns().iter().copied())
    }

    /// Returns the configured patterns.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true when any pattern occurs in the normalized text.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|pattern| normalized.contains(pattern.as_str()))
    }
}

/// The four rubric detectors, one per dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorSet {
    /// Role detector.
    role: PhraseDetector,
    /// Task detector.
    task: PhraseDetector,
    /// Context detector.
    context: PhraseDetector,
    /// Format detector.
    format: PhraseDetector,
}

impl DetectorSet {
    /// Returns the detector for `dimension`.
    #[must_use]
    pub const fn detector(&self, dimension: RubricDimension) -> &PhraseDetector {
        match dimension {
            RubricDimension::Role => &self.role,
            RubricDimension::Task => &self.task,
            RubricDimension::Context => &self.context,
            RubricDimension::Format => &self.format,
        }
    }

    /// Returns a copy with the detector for `dimension` replaced by `patterns`.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, dimension: RubricDimension, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let detector = PhraseDetector::new(patterns);
        match dimension {
            RubricDimension::Role => self.role = detector,
            RubricDimension::Task => self.task = detector,
            RubricDimension::Context => self.context = detector,
            RubricDimension::Format => self.format = detector,
        }
        self
    }

    /// Runs all four detectors over already-normalized text.
    #[must_use]
    pub fn detect(&self, normalized: &str) -> RubricSignal {
        RubricSignal {
            has_role: self.role.matches(normalized),
            has_task: self.task.matches(normalized),
            has_context: self.context.matches(normalized),
            has_format: self.format.matches(normalized),
        }
    }
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self {
            role: PhraseDetector::with_defaults(RubricDimension::Role),
            task: PhraseDetector::with_defaults(RubricDimension::Task),
            context: PhraseDetector::with_defaults(RubricDimension::Context),
            format: PhraseDetector::with_defaults(RubricDimension::Format),
        }
    }
}
