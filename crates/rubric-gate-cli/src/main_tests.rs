// crates/rubric-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and bounded input reads.
// Purpose: Ensure oversized submissions are truncated, never rejected.
// Dependencies: rubric-gate-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap wiring and the truncating submission reader.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use clap::Parser;
use tempfile::NamedTempFile;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::MAX_INPUT_BYTES;
use super::decode_prefix;
use super::read_prefix;
use super::read_submission;

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn mark_accepts_config_and_input() {
    let cli = Cli::try_parse_from([
        "rubric-gate",
        "mark",
        "--config",
        "gate.toml",
        "--input",
        "answer.txt",
    ])
    .unwrap();
    let Commands::Mark(command) = cli.command else {
        panic!("expected mark command");
    };
    assert_eq!(command.config.as_deref(), Some(Path::new("gate.toml")));
    assert_eq!(command.input.as_deref(), Some(Path::new("answer.txt")));
}

#[test]
fn config_check_parses() {
    let cli = Cli::try_parse_from(["rubric-gate", "config", "check"]).unwrap();
    let Commands::Config {
        command: ConfigCommand::Check(command),
    } = cli.command
    else {
        panic!("expected config check command");
    };
    assert!(command.config.is_none());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["rubric-gate", "grade"]).is_err());
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

#[test]
fn read_submission_reads_small_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Role: planner").unwrap();
    let text = read_submission(Some(file.path()), 64).unwrap();
    assert_eq!(text, "Role: planner");
}

#[test]
fn read_submission_keeps_exact_limit() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[b'a'; 8]).unwrap();
    assert_eq!(read_submission(Some(file.path()), 8).unwrap().len(), 8);
}

#[test]
fn read_submission_truncates_file_over_default_limit() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&vec![b'w'; 1_500_000]).unwrap();
    let text = read_submission(Some(file.path()), MAX_INPUT_BYTES).unwrap();
    assert_eq!(text.len(), MAX_INPUT_BYTES);
    assert!(text.bytes().all(|byte| byte == b'w'));
}

#[test]
fn read_submission_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let err = read_submission(Some(&path), 8).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}

#[test]
fn read_prefix_truncates_streams_over_limit() {
    let bytes = read_prefix(Cursor::new(vec![b'x'; 17]), 16).unwrap();
    assert_eq!(bytes.len(), 16);
}

#[test]
fn decode_prefix_drops_character_split_at_cut() {
    // "Rome é" with the two-byte "é" cut after its first byte.
    let mut bytes = b"Rome ".to_vec();
    bytes.push(0xC3);
    assert_eq!(decode_prefix(bytes), "Rome ");
}

#[test]
fn decode_prefix_replaces_invalid_interior_bytes() {
    let bytes = vec![b'a', 0xFF, b'b'];
    assert_eq!(decode_prefix(bytes), "a\u{FFFD}b");
}

#[test]
fn decode_prefix_keeps_complete_multibyte_text() {
    let text = "café Roma";
    assert_eq!(decode_prefix(text.as_bytes().to_vec()), text);
}
