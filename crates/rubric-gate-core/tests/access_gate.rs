// crates/rubric-gate-core/tests/access_gate.rs
// ============================================================================
// Module: Access Gate Tests
// Description: Code checks, token issuance, expiry, and tamper detection.
// Purpose: Pin the unauthenticated/authenticated transitions of the gate.
// ============================================================================

//! Access gate state machine tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rubric_gate_core::AccessGate;
use rubric_gate_core::GateConfig;
use rubric_gate_core::GateError;
use rubric_gate_core::SessionRejection;
use rubric_gate_core::UnixSeconds;
use rubric_gate_core::check_code;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const CODE: &str = "ROME-PROMPT-01";
const T0: i64 = 1_700_000_000;

fn config() -> GateConfig {
    GateConfig {
        access_code: CODE.to_string(),
        signing_key: b"unit-test-signing-key".to_vec(),
        session_ttl_minutes: 60,
        max_code_chars: 80,
    }
}

fn gate() -> AccessGate {
    AccessGate::new(config()).expect("gate")
}

fn at(offset: i64) -> UnixSeconds {
    UnixSeconds::new(T0 + offset)
}

// ============================================================================
// SECTION: Code Checks
// ============================================================================

#[test]
fn code_matches_after_trimming() {
    assert!(check_code("  ROME-PROMPT-01\n", CODE));
    assert!(!check_code("rome-prompt-01", CODE));
    assert!(!check_code("ROME-PROMPT", CODE));
    assert!(!check_code("ROME-PROMPT-011", CODE));
    assert!(!check_code("", CODE));
    assert!(!check_code("   ", CODE));
}

#[test]
fn oversized_code_is_truncated_before_comparison() {
    let configured = "a".repeat(80);
    let gate = AccessGate::new(GateConfig {
        access_code: configured,
        ..config()
    })
    .unwrap();
    assert!(gate.check_code(&"a".repeat(81)));
    assert!(!gate.check_code(&"a".repeat(79)));
}

#[test]
fn unlock_rejects_every_bad_code_identically() {
    for code in ["", "   ", "wrong", "ROME-PROMPT-0"] {
        let err = gate().unlock(code, at(0)).unwrap_err();
        assert!(matches!(err, GateError::InvalidCode));
        assert_eq!(err.to_string(), "invalid access code");
    }
}

// ============================================================================
// SECTION: Token Lifecycle
// ============================================================================

#[test]
fn token_is_valid_until_expiry_instant() {
    let gate = gate();
    let token = gate.unlock(CODE, at(0)).unwrap();
    let token = Some(token.as_str());

    assert!(gate.validate(token, at(0)));
    assert!(gate.validate(token, at(3_599)));
    assert!(!gate.validate(token, at(3_600)));
    assert!(!gate.validate(token, at(7_200)));
    assert_eq!(gate.inspect(token, at(3_600)), Err(SessionRejection::Expired));
}

#[test]
fn claims_carry_expiry() {
    let gate = gate();
    let token = gate.issue_session(at(0)).unwrap();
    let claims = gate.inspect(Some(token.as_str()), at(1)).unwrap();
    assert_eq!(claims.exp, at(3_600));
}

#[test]
fn missing_token_is_rejected() {
    assert_eq!(gate().inspect(None, at(0)), Err(SessionRejection::Missing));
    assert_eq!(gate().inspect(Some("  "), at(0)), Err(SessionRejection::Missing));
}

#[test]
fn malformed_token_is_rejected() {
    let gate = gate();
    for token in ["garbage", "v1.only", "v2.e30.AAAA", "v1.%%%.%%%"] {
        assert_eq!(gate.inspect(Some(token), at(0)), Err(SessionRejection::Malformed));
    }
    let oversized = "v1.".repeat(400);
    assert_eq!(gate.inspect(Some(&oversized), at(0)), Err(SessionRejection::Malformed));
}

#[test]
fn altered_payload_fails_signature_check() {
    let gate = gate();
    let token = gate.issue_session(at(0)).unwrap().into_string();
    let mut parts: Vec<&str> = token.split('.').collect();
    let forged = URL_SAFE_NO_PAD.encode(br#"{"exp":9999999999}"#);
    parts[1] = &forged;
    let forged_token = parts.join(".");

    assert_eq!(gate.inspect(Some(&forged_token), at(0)), Err(SessionRejection::BadSignature));
}

#[test]
fn token_from_other_key_is_rejected() {
    let other = AccessGate::new(GateConfig {
        signing_key: b"another-key".to_vec(),
        ..config()
    })
    .unwrap();
    let token = other.issue_session(at(0)).unwrap();
    assert_eq!(gate().inspect(Some(token.as_str()), at(0)), Err(SessionRejection::BadSignature));
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

#[test]
fn gate_rejects_unusable_config() {
    let empty_code = GateConfig {
        access_code: "  ".to_string(),
        ..config()
    };
    assert!(matches!(AccessGate::new(empty_code), Err(GateError::Config(_))));

    let empty_key = GateConfig {
        signing_key: Vec::new(),
        ..config()
    };
    assert!(matches!(AccessGate::new(empty_key), Err(GateError::Config(_))));

    let zero_ttl = GateConfig {
        session_ttl_minutes: 0,
        ..config()
    };
    assert!(matches!(AccessGate::new(zero_ttl), Err(GateError::Config(_))));
}

#[test]
fn debug_output_redacts_secrets() {
    let rendered = format!("{:?}", config());
    assert!(!rendered.contains(CODE));
    assert!(!rendered.contains("unit-test-signing-key"));
    let token = gate().issue_session(at(0)).unwrap();
    assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
}
