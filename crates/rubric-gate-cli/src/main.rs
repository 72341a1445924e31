// crates/rubric-gate-cli/src/main.rs
// ============================================================================
// Module: Rubric Gate CLI Entry Point
// Description: Command dispatcher for the gate server and offline marking.
// Purpose: Provide a safe CLI for serving, marking, and config checks.
// Dependencies: clap, rubric-gate-core, rubric-gate-config, rubric-gate-server, tokio.
// ============================================================================

//! ## Overview
//! `rubric-gate serve` runs the HTTP server, `rubric-gate mark` marks one
//! submission offline and prints the verdict JSON, and `rubric-gate config
//! check` loads and validates configuration. Inputs are untrusted; submissions
//! are truncated to a fixed byte budget before marking.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use rubric_gate_config::RubricGateConfig;
use rubric_gate_core::MarkingEngine;
use rubric_gate_server::GateServer;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Bytes of a submission kept from a file or stdin; the remainder is ignored.
const MAX_INPUT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "rubric-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeCommand),
    /// Mark a single submission and print the verdict.
    Mark(MarkCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `mark`.
#[derive(Args, Debug)]
struct MarkCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Submission file; stdin is read when omitted.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate configuration and print the effective task metadata.
    Check(ConfigCheckCommand),
}

/// Arguments for `config check`.
#[derive(Args, Debug)]
struct ConfigCheckCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Mark(command) => command_mark(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let server = GateServer::from_config(config)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `mark` command.
fn command_mark(command: &MarkCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let text = read_submission(command.input.as_deref(), MAX_INPUT_BYTES)?;
    let engine = MarkingEngine::new(config.marking_config());
    let verdict = engine.mark(&text);
    let json = serde_json::to_string_pretty(&verdict)
        .map_err(|err| CliError::new(format!("verdict serialization failed: {err}")))?;
    write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Check(command) => command_config_check(&command),
    }
}

/// Executes the `config check` command.
fn command_config_check(command: &ConfigCheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    if config.access.code.is_none() {
        write_stderr_line("warning: no access code configured; `serve` will refuse to start")
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    let json = serde_json::to_string_pretty(&config.task_metadata())
        .map_err(|err| CliError::new(format!("metadata serialization failed: {err}")))?;
    write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration with a uniform error message.
fn load_config(path: Option<&Path>) -> CliResult<RubricGateConfig> {
    RubricGateConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads a submission from `path` or stdin, keeping at most `max_bytes`.
///
/// Input past the limit is dropped rather than rejected.
fn read_submission(path: Option<&Path>, max_bytes: usize) -> CliResult<String> {
    let bytes = match path {
        Some(path) => File::open(path).and_then(|file| read_prefix(file, max_bytes)),
        None => read_prefix(std::io::stdin().lock(), max_bytes),
    }
    .map_err(|err| CliError::new(read_error_message(path, &err)))?;
    Ok(decode_prefix(bytes))
}

/// Reads at most `max_bytes` from `reader`.
fn read_prefix(reader: impl Read, max_bytes: usize) -> std::io::Result<Vec<u8>> {
    let read_limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    reader.take(read_limit).read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Decodes a byte prefix as text.
///
/// A multi-byte sequence split by the size cut is dropped; other invalid
/// bytes become U+FFFD.
fn decode_prefix(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let utf8_error = err.utf8_error();
            let mut bytes = err.into_bytes();
            if utf8_error.error_len().is_none() {
                bytes.truncate(utf8_error.valid_up_to());
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// Formats a read failure for the given source.
fn read_error_message(path: Option<&Path>, error: &std::io::Error) -> String {
    let source = path.map_or_else(|| "stdin".to_string(), |path| path.display().to_string());
    format!("failed to read {source}: {error}")
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
