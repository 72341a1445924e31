// crates/rubric-gate-core/src/core/task.rs
// ============================================================================
// Module: Task Metadata
// Description: Static prompt-writing task content and gate guidance.
// Purpose: Publish the question, template, and word-count guidance to clients.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Task metadata is read-only data served to clients alongside the marker.
//! The word-count gate shown to learners is the same value the marking engine
//! enforces; both are built from one configuration field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default minimum word count before a submission is marked.
pub const DEFAULT_MIN_WORDS_GATE: usize = 20;

/// Default upper word-count guidance shown to learners.
pub const DEFAULT_MAX_WORDS: usize = 300;

/// Default scenario and instructions shown to learners.
pub const DEFAULT_QUESTION_TEXT: &str = "Scenario:
You are responsible for organising a workplace social event for your organisation later this year. The event must bring together staff from different teams and seniority levels, including on-site and remote workers. Attendance is optional, but previous events have had low turnout.

You have a fixed budget, a preferred city or region, and a date window, but you must decide on the type of venue and style of event. Some attendees have accessibility needs, dietary requirements, and caring responsibilities. Senior leaders want the event to feel professional without being formal.

Your goal is to use AI to help identify and recommend a suitable venue that balances cost, accessibility, atmosphere, and engagement.

Task:
Write a prompt that asks AI to recommend one primary venue and one backup option. Your prompt must force the AI to justify its choices and explain trade-offs.
Use the four-part prompt structure:
Role: Tell AI who you are, or what role you want it to adopt.
Task: What do you want AI to do?
Context: Who is AI creating the content for?
Format: How do you want the AI to present the information (structure, tone) - what specific information (constraints) are you requiring?";

/// Default blank answer skeleton.
pub const DEFAULT_TEMPLATE_TEXT: &str = "Role:\nTask:\nContext:\nFormat:";

/// Default exemplar answer attached to every full verdict.
pub const DEFAULT_MODEL_ANSWER: &str = "Role:
Act as an experienced corporate events planner with expertise in inclusive workplace design, staff engagement, and budget-conscious venue selection.

Task:
Recommend one primary venue and one backup venue for a workplace social event.
Justify each recommendation against cost, accessibility, inclusivity, atmosphere, and likelihood of attendance.
Explain any trade-offs made and suggest a high-level structure for the event.

Context (Audience):
The event is for 60 staff from a mixed professional services organisation based in London.
Attendees include senior leaders, early-career staff, and remote workers travelling in.
The total budget is £4,000, including venue hire and light catering.
The event will run from 5:30–8:30pm on a weekday.
Requirements include step-free access, accessible toilets, vegetarian, vegan, halal, and alcohol-free options,
and easy access from major transport links.
Previous events have suffered from low attendance due to poor location choices and overly formal settings.

Format:
Present your response using the following structure:
1. Brief summary of the recommended approach
2. Primary venue recommendation with justification
3. Backup venue recommendation and comparison
4. Proposed event structure (arrival, main activity, close)
5. Final justification explaining why these choices maximise engagement and attendance

Use a clear, professional tone suitable for sharing with senior managers.
Avoid unnecessary jargon and focus on practical decision-making.";

/// Default framework guidance attached to every full verdict.
pub const DEFAULT_FRAMEWORK_TEXT: &str = "Strong prompts for complex workplace decisions do more than ask for ideas.
They are designed to guide the AI towards making realistic, usable choices.

Effective prompts usually:
- assign a clear expert role
- require the AI to make and justify decisions
- include practical constraints such as budget, accessibility, and audience needs
- ask for comparison, prioritisation, or trade-offs
- control the structure and tone of the output

If your prompt only asks for suggestions, the response is likely to be generic.
Decision-focused prompts produce more specific and useful results.";

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Client-facing task metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Scenario and instructions.
    pub question_text: String,
    /// Blank answer skeleton.
    pub template_text: String,
    /// Human-readable length guidance, e.g. `20–300`.
    pub target_words: String,
    /// Word-count gate enforced by the marker.
    pub min_words_gate: usize,
    /// Upper word-count guidance.
    pub max_words: usize,
    /// Link back to the course page (empty when unset).
    pub course_back_url: String,
    /// Link to the next lesson (empty when unset).
    pub next_lesson_url: String,
}

impl TaskMetadata {
    /// Builds metadata, deriving `target_words` from the gate and upper bound.
    #[must_use]
    pub fn new(
        question_text: impl Into<String>,
        template_text: impl Into<String>,
        min_words_gate: usize,
        max_words: usize,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            template_text: template_text.into(),
            target_words: format!("{min_words_gate}–{max_words}"),
            min_words_gate,
            max_words,
            course_back_url: String::new(),
            next_lesson_url: String::new(),
        }
    }

    /// Returns a copy carrying the given navigation links.
    #[must_use]
    pub fn with_links(
        mut self,
        course_back_url: impl Into<String>,
        next_lesson_url: impl Into<String>,
    ) -> Self {
        self.course_back_url = course_back_url.into();
        self.next_lesson_url = next_lesson_url.into();
        self
    }
}

impl Default for TaskMetadata {
    fn default() -> Self {
        Self::new(
            DEFAULT_QUESTION_TEXT,
            DEFAULT_TEMPLATE_TEXT,
            DEFAULT_MIN_WORDS_GATE,
            DEFAULT_MAX_WORDS,
        )
    }
}
