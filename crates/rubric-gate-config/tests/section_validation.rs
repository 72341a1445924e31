//! Section validation tests for rubric-gate-config.
// crates/rubric-gate-config/tests/section_validation.rs
// =============================================================================
// Module: Section Validation Tests
// Description: Validate per-section limits and derived runtime configs.
// Purpose: Ensure invalid settings fail closed and builders stay consistent.
// =============================================================================

use rubric_gate_config::ConfigError;
use rubric_gate_config::RubricGateConfig;
use rubric_gate_core::MarkingEngine;
use rubric_gate_core::RubricDimension;

type TestResult = Result<(), String>;

fn assert_invalid(toml: &str, needle: &str) -> TestResult {
    match RubricGateConfig::from_toml_str(toml) {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected invalid config for {toml:?}")),
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn empty_document_yields_defaults() -> TestResult {
    let config = RubricGateConfig::from_toml_str("").map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:3000" || config.server.max_body_bytes != 1024 * 1024 {
        return Err("unexpected server defaults".to_string());
    }
    if config.access.code.is_some() || config.access.max_code_chars != 80 {
        return Err("unexpected access defaults".to_string());
    }
    if config.session.ttl_minutes != 60 || !config.session.secure_cookie {
        return Err("unexpected session defaults".to_string());
    }
    if config.marking.max_answer_chars != 6000 {
        return Err("unexpected marking defaults".to_string());
    }
    if config.task.min_words_gate != 20 || config.task.max_words != 300 {
        return Err("unexpected task defaults".to_string());
    }
    if !config.audit.enabled || config.audit.path.is_some() {
        return Err("unexpected audit defaults".to_string());
    }
    Ok(())
}

#[test]
fn access_code_is_trimmed() -> TestResult {
    let config = RubricGateConfig::from_toml_str("[access]\ncode = \"  ROME-PROMPT-01 \"\n")
        .map_err(|err| err.to_string())?;
    if config.access.code.as_deref() != Some("ROME-PROMPT-01") {
        return Err(format!("unexpected code {:?}", config.access.code));
    }
    Ok(())
}

// ============================================================================
// SECTION: Section Limits
// ============================================================================

#[test]
fn server_bind_must_parse() -> TestResult {
    assert_invalid("[server]\nbind = \"localhost\"\n", "server.bind")
}

#[test]
fn server_body_limit_is_bounded() -> TestResult {
    assert_invalid("[server]\nmax_body_bytes = 10\n", "server.max_body_bytes")?;
    assert_invalid("[server]\nmax_body_bytes = 999999999\n", "server.max_body_bytes")
}

#[test]
fn access_code_must_be_non_empty() -> TestResult {
    assert_invalid("[access]\ncode = \"   \"\n", "access.code must be non-empty")
}

#[test]
fn access_code_must_fit_code_limit() -> TestResult {
    assert_invalid(
        "[access]\ncode = \"ABCDEFGHIJK\"\nmax_code_chars = 10\n",
        "access.code exceeds access.max_code_chars",
    )
}

#[test]
fn access_code_limit_is_bounded() -> TestResult {
    assert_invalid("[access]\nmax_code_chars = 0\n", "access.max_code_chars")
}

#[test]
fn session_ttl_is_bounded() -> TestResult {
    assert_invalid("[session]\nttl_minutes = 0\n", "session.ttl_minutes")?;
    assert_invalid("[session]\nttl_minutes = 20000\n", "session.ttl_minutes")
}

#[test]
fn session_cookie_name_is_restricted() -> TestResult {
    assert_invalid("[session]\ncookie_name = \"bad name;\"\n", "session.cookie_name")?;
    assert_invalid("[session]\ncookie_name = \"\"\n", "session.cookie_name")
}

#[test]
fn session_secret_must_be_long_enough() -> TestResult {
    assert_invalid("[session]\nsecret = \"too-short\"\n", "session.secret")
}

#[test]
fn marking_limit_is_bounded() -> TestResult {
    assert_invalid("[marking]\nmax_answer_chars = 0\n", "marking.max_answer_chars")
}

#[test]
fn gate_must_not_exceed_max_words() -> TestResult {
    assert_invalid("[task]\nmin_words_gate = 400\n", "task.min_words_gate")?;
    assert_invalid("[task]\nmin_words_gate = 0\n", "task.min_words_gate")
}

#[test]
fn task_links_must_be_http() -> TestResult {
    assert_invalid("[task]\ncourse_back_url = \"javascript:alert(1)\"\n", "task.course_back_url")?;
    assert_invalid("[task]\nnext_lesson_url = \"ftp://example.com\"\n", "task.next_lesson_url")
}

#[test]
fn task_text_overrides_must_be_non_empty() -> TestResult {
    assert_invalid("[task]\nquestion_text = \"  \"\n", "task.question_text")
}

#[test]
fn rubric_overrides_must_list_patterns() -> TestResult {
    assert_invalid("[rubric]\nrole = []\n", "rubric.role")?;
    assert_invalid("[rubric]\nformat = [\"\"]\n", "rubric.format")
}

#[test]
fn audit_path_must_be_non_empty() -> TestResult {
    assert_invalid("[audit]\npath = \"\"\n", "audit.path")
}

// ============================================================================
// SECTION: Builders
// ============================================================================

#[test]
fn metadata_and_engine_share_the_gate() -> TestResult {
    let config = RubricGateConfig::from_toml_str("[task]\nmin_words_gate = 5\nmax_words = 50\n")
        .map_err(|err| err.to_string())?;
    let metadata = config.task_metadata();
    let engine = MarkingEngine::new(config.marking_config());
    if metadata.min_words_gate != engine.min_words_gate() {
        return Err("metadata gate diverged from engine gate".to_string());
    }
    if metadata.target_words != "5–50" {
        return Err(format!("unexpected target words {}", metadata.target_words));
    }
    if !engine.mark("one two three four").is_gated() {
        return Err("four words should be gated".to_string());
    }
    if engine.mark("one two three four five").is_gated() {
        return Err("five words should be marked".to_string());
    }
    Ok(())
}

#[test]
fn rubric_overrides_replace_only_listed_dimensions() -> TestResult {
    let config = RubricGateConfig::from_toml_str("[rubric]\nrole = [\"Persona\"]\n")
        .map_err(|err| err.to_string())?;
    let detectors = config.rubric.detectors();
    if detectors.detector(RubricDimension::Role).patterns() != ["persona".to_string()] {
        return Err("role override not applied".to_string());
    }
    if detectors.detector(RubricDimension::Task).patterns().is_empty() {
        return Err("task defaults should remain".to_string());
    }
    Ok(())
}

#[test]
fn gate_config_requires_access_code() -> TestResult {
    let config = RubricGateConfig::from_toml_str("").map_err(|err| err.to_string())?;
    match config.gate_config(vec![7; 32]) {
        Err(ConfigError::Invalid(message)) if message.contains("ACCESS_CODE") => Ok(()),
        other => Err(format!("expected missing code error, got {other:?}")),
    }
}

#[test]
fn gate_config_carries_session_settings() -> TestResult {
    let config = RubricGateConfig::from_toml_str(
        "[access]\ncode = \"ROME\"\nmax_code_chars = 40\n\n[session]\nttl_minutes = 30\n",
    )
    .map_err(|err| err.to_string())?;
    let gate = config.gate_config(vec![7; 32]).map_err(|err| err.to_string())?;
    if gate.access_code != "ROME" || gate.session_ttl_minutes != 30 || gate.max_code_chars != 40 {
        return Err("gate config did not carry settings".to_string());
    }
    Ok(())
}
