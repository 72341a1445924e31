// crates/rubric-gate-config/src/config.rs
// ============================================================================
// Module: Rubric Gate Configuration
// Description: Configuration loading, environment overrides, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: rubric-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits, then
//! overlaid with the deployment environment variables (`ACCESS_CODE`,
//! `COOKIE_SECRET`, `SESSION_MINUTES`, `COURSE_BACK_URL`/`BACK_URL`,
//! `NEXT_LESSON_URL`, `PORT`). Environment lookups are injected so callers and
//! tests control them explicitly. Missing or invalid configuration fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use rubric_gate_core::DEFAULT_FRAMEWORK_TEXT;
use rubric_gate_core::DEFAULT_MAX_WORDS;
use rubric_gate_core::DEFAULT_MIN_WORDS_GATE;
use rubric_gate_core::DEFAULT_MODEL_ANSWER;
use rubric_gate_core::DEFAULT_QUESTION_TEXT;
use rubric_gate_core::DEFAULT_TEMPLATE_TEXT;
use rubric_gate_core::DetectorSet;
use rubric_gate_core::GateConfig;
use rubric_gate_core::MarkingConfig;
use rubric_gate_core::RubricDimension;
use rubric_gate_core::TaskMetadata;
use rubric_gate_core::runtime::DEFAULT_MAX_ANSWER_CHARS;
use rubric_gate_core::runtime::DEFAULT_MAX_CODE_CHARS;
use rubric_gate_core::runtime::DEFAULT_SESSION_TTL_MINUTES;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "rubric-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "RUBRIC_GATE_CONFIG";
/// Environment variable carrying the shared access code.
pub const ACCESS_CODE_ENV: &str = "ACCESS_CODE";
/// Environment variable carrying the session signing secret.
pub const COOKIE_SECRET_ENV: &str = "COOKIE_SECRET";
/// Environment variable carrying the session lifetime in minutes.
pub const SESSION_MINUTES_ENV: &str = "SESSION_MINUTES";
/// Environment variable carrying the course back link.
pub const COURSE_BACK_URL_ENV: &str = "COURSE_BACK_URL";
/// Legacy alias for [`COURSE_BACK_URL_ENV`].
pub const BACK_URL_ENV: &str = "BACK_URL";
/// Environment variable carrying the next lesson link.
pub const NEXT_LESSON_URL_ENV: &str = "NEXT_LESSON_URL";
/// Environment variable carrying the listen port.
pub const PORT_ENV: &str = "PORT";

/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default bind address for the HTTP server.
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:3000";
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Minimum allowed request body limit in bytes.
pub(crate) const MIN_MAX_BODY_BYTES: usize = 1024;
/// Maximum allowed request body limit in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// Default session cookie name.
pub(crate) const DEFAULT_COOKIE_NAME: &str = "rubric_gate_session";
/// Maximum cookie name length.
pub(crate) const MAX_COOKIE_NAME_LENGTH: usize = 64;
/// Minimum session secret length in bytes.
pub(crate) const MIN_SESSION_SECRET_BYTES: usize = 16;
/// Maximum session secret length in bytes.
pub(crate) const MAX_SESSION_SECRET_BYTES: usize = 1024;
/// Maximum session lifetime in minutes (one week).
pub(crate) const MAX_SESSION_TTL_MINUTES: u32 = 7 * 24 * 60;
/// Maximum configurable access-code length in characters.
pub(crate) const MAX_CODE_CHARS_LIMIT: usize = 1024;
/// Maximum configurable submission length in characters.
pub(crate) const MAX_ANSWER_CHARS_LIMIT: usize = 100_000;
/// Maximum configurable word-count guidance.
pub(crate) const MAX_WORDS_LIMIT: usize = 10_000;
/// Maximum length of any configured task text in bytes.
pub(crate) const MAX_TASK_TEXT_BYTES: usize = 64 * 1024;
/// Maximum length of a navigation link.
pub(crate) const MAX_URL_LENGTH: usize = 2048;
/// Maximum number of patterns per rubric dimension.
pub(crate) const MAX_RUBRIC_PATTERNS: usize = 256;
/// Maximum length of a single rubric pattern.
pub(crate) const MAX_RUBRIC_PATTERN_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Rubric Gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RubricGateConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Access code configuration.
    #[serde(default)]
    pub access: AccessConfig,
    /// Session token configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Marking limits.
    #[serde(default)]
    pub marking: MarkingLimitsConfig,
    /// Task content and word-count guidance.
    #[serde(default)]
    pub task: TaskConfig,
    /// Rubric pattern overrides.
    #[serde(default)]
    pub rubric: RubricConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl RubricGateConfig {
    /// Loads configuration using the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, &|key| std::env::var(key).ok())
    }

    /// Loads configuration using an explicit environment lookup.
    ///
    /// Resolution order: `path`, then `RUBRIC_GATE_CONFIG`, then
    /// `rubric-gate.toml` in the working directory when present, else
    /// built-in defaults. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env(path: Option<&Path>, env: &EnvLookup<'_>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path, env) {
            Some(resolved) => Self::read_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file with size and encoding limits.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies deployment environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric override does not parse.
    pub fn apply_env_overrides(&mut self, env: &EnvLookup<'_>) -> Result<(), ConfigError> {
        if let Some(code) = non_empty(env(ACCESS_CODE_ENV)) {
            self.access.code = Some(code);
        }
        if let Some(secret) = non_empty(env(COOKIE_SECRET_ENV)) {
            self.session.secret = Some(secret);
        }
        if let Some(minutes) = non_empty(env(SESSION_MINUTES_ENV)) {
            self.session.ttl_minutes = minutes.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{SESSION_MINUTES_ENV} must be a whole number"))
            })?;
        }
        if let Some(url) =
            non_empty(env(COURSE_BACK_URL_ENV)).or_else(|| non_empty(env(BACK_URL_ENV)))
        {
            self.task.course_back_url = url;
        }
        if let Some(url) = non_empty(env(NEXT_LESSON_URL_ENV)) {
            self.task.next_lesson_url = url;
        }
        if let Some(port) = non_empty(env(PORT_ENV)) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{PORT_ENV} must be a valid port")))?;
            self.server.bind = format!("0.0.0.0:{port}");
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.access.validate()?;
        self.session.validate()?;
        self.marking.validate()?;
        self.task.validate()?;
        self.rubric.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Builds the immutable marking engine configuration.
    #[must_use]
    pub fn marking_config(&self) -> MarkingConfig {
        MarkingConfig {
            min_words_gate: self.task.min_words_gate,
            max_answer_chars: self.marking.max_answer_chars,
            framework_text: self
                .task
                .framework_text
                .clone()
                .unwrap_or_else(|| DEFAULT_FRAMEWORK_TEXT.to_string()),
            model_answer: self
                .task
                .model_answer
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ANSWER.to_string()),
            detectors: self.rubric.detectors(),
        }
    }

    /// Builds the client-facing task metadata from the same gate the engine uses.
    #[must_use]
    pub fn task_metadata(&self) -> TaskMetadata {
        TaskMetadata::new(
            self.task.question_text.as_deref().unwrap_or(DEFAULT_QUESTION_TEXT),
            self.task.template_text.as_deref().unwrap_or(DEFAULT_TEMPLATE_TEXT),
            self.task.min_words_gate,
            self.task.max_words,
        )
        .with_links(self.task.course_back_url.clone(), self.task.next_lesson_url.clone())
    }

    /// Builds the access gate configuration with the given signing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no access code is configured.
    pub fn gate_config(&self, signing_key: Vec<u8>) -> Result<GateConfig, ConfigError> {
        let access_code = self.access.code.clone().ok_or_else(|| {
            ConfigError::Invalid(format!("access.code or {ACCESS_CODE_ENV} must be set"))
        })?;
        Ok(GateConfig {
            access_code,
            signing_key,
            session_ttl_minutes: self.session.ttl_minutes,
            max_code_chars: self.access.max_code_chars,
        })
    }
}

/// Environment variable lookup used for overrides.
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("server.bind must be a socket address".to_string()))
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if !(MIN_MAX_BODY_BYTES ..= MAX_MAX_BODY_BYTES).contains(&self.max_body_bytes) {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be between {MIN_MAX_BODY_BYTES} and \
                 {MAX_MAX_BODY_BYTES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Access and Session
// ============================================================================

/// Access code configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Shared access code (required before serving).
    #[serde(default)]
    pub code: Option<String>,
    /// Submitted codes are truncated to this many characters.
    #[serde(default = "default_max_code_chars")]
    pub max_code_chars: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            code: None,
            max_code_chars: default_max_code_chars(),
        }
    }
}

impl AccessConfig {
    /// Validates and normalizes access configuration.
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.max_code_chars == 0 || self.max_code_chars > MAX_CODE_CHARS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "access.max_code_chars must be between 1 and {MAX_CODE_CHARS_LIMIT}"
            )));
        }
        if let Some(code) = &self.code {
            let trimmed = code.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid("access.code must be non-empty".to_string()));
            }
            if trimmed.chars().count() > self.max_code_chars {
                return Err(ConfigError::Invalid(
                    "access.code exceeds access.max_code_chars".to_string(),
                ));
            }
            self.code = Some(trimmed.to_string());
        }
        Ok(())
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Cookie name carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Signing secret; a random per-process key is used when absent.
    #[serde(default)]
    pub secret: Option<String>,
    /// Session lifetime in minutes.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u32,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secret: None,
            ttl_minutes: default_ttl_minutes(),
            secure_cookie: true,
        }
    }
}

impl SessionConfig {
    /// Validates session configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.cookie_name.as_str();
        if name.is_empty() || name.len() > MAX_COOKIE_NAME_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "session.cookie_name must be 1 to {MAX_COOKIE_NAME_LENGTH} characters"
            )));
        }
        if !name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-') {
            return Err(ConfigError::Invalid(
                "session.cookie_name may contain only ascii letters, digits, '_' and '-'"
                    .to_string(),
            ));
        }
        if self.ttl_minutes == 0 || self.ttl_minutes > MAX_SESSION_TTL_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "session.ttl_minutes must be between 1 and {MAX_SESSION_TTL_MINUTES}"
            )));
        }
        let secret_bounds = MIN_SESSION_SECRET_BYTES ..= MAX_SESSION_SECRET_BYTES;
        if self.secret.as_ref().is_some_and(|secret| !secret_bounds.contains(&secret.len())) {
            return Err(ConfigError::Invalid(format!(
                "session.secret must be {MIN_SESSION_SECRET_BYTES} to \
                 {MAX_SESSION_SECRET_BYTES} bytes"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Marking and Task
// ============================================================================

/// Marking input limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkingLimitsConfig {
    /// Submissions are truncated to this many characters.
    #[serde(default = "default_max_answer_chars")]
    pub max_answer_chars: usize,
}

impl Default for MarkingLimitsConfig {
    fn default() -> Self {
        Self {
            max_answer_chars: default_max_answer_chars(),
        }
    }
}

impl MarkingLimitsConfig {
    /// Validates marking limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_answer_chars == 0 || self.max_answer_chars > MAX_ANSWER_CHARS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "marking.max_answer_chars must be between 1 and {MAX_ANSWER_CHARS_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Task content and word-count guidance.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Word-count gate shared by the marker and the published metadata.
    #[serde(default = "default_min_words_gate")]
    pub min_words_gate: usize,
    /// Upper word-count guidance.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Scenario text override.
    #[serde(default)]
    pub question_text: Option<String>,
    /// Answer template override.
    #[serde(default)]
    pub template_text: Option<String>,
    /// Model answer override.
    #[serde(default)]
    pub model_answer: Option<String>,
    /// Framework guidance override.
    #[serde(default)]
    pub framework_text: Option<String>,
    /// Link back to the course page.
    #[serde(default)]
    pub course_back_url: String,
    /// Link to the next lesson.
    #[serde(default)]
    pub next_lesson_url: String,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            min_words_gate: default_min_words_gate(),
            max_words: default_max_words(),
            question_text: None,
            template_text: None,
            model_answer: None,
            framework_text: None,
            course_back_url: String::new(),
            next_lesson_url: String::new(),
        }
    }
}

impl TaskConfig {
    /// Validates task configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_words == 0 || self.max_words > MAX_WORDS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "task.max_words must be between 1 and {MAX_WORDS_LIMIT}"
            )));
        }
        if self.min_words_gate == 0 || self.min_words_gate > self.max_words {
            return Err(ConfigError::Invalid(
                "task.min_words_gate must be between 1 and task.max_words".to_string(),
            ));
        }
        let texts = [
            ("task.question_text", &self.question_text),
            ("task.template_text", &self.template_text),
            ("task.model_answer", &self.model_answer),
            ("task.framework_text", &self.framework_text),
        ];
        for (field, text) in texts {
            if text
                .as_ref()
                .is_some_and(|text| text.trim().is_empty() || text.len() > MAX_TASK_TEXT_BYTES)
            {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be non-empty and at most {MAX_TASK_TEXT_BYTES} bytes"
                )));
            }
        }
        validate_url("task.course_back_url", &self.course_back_url)?;
        validate_url("task.next_lesson_url", &self.next_lesson_url)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Rubric
// ============================================================================

/// Optional per-dimension pattern overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RubricConfig {
    /// Role patterns.
    #[serde(default)]
    pub role: Option<Vec<String>>,
    /// Task patterns.
    #[serde(default)]
    pub task: Option<Vec<String>>,
    /// Context patterns.
    #[serde(default)]
    pub context: Option<Vec<String>>,
    /// Format patterns.
    #[serde(default)]
    pub format: Option<Vec<String>>,
}

impl RubricConfig {
    /// Returns the override list for `dimension`, if any.
    const fn patterns(&self, dimension: RubricDimension) -> Option<&Vec<String>> {
        match dimension {
            RubricDimension::Role => self.role.as_ref(),
            RubricDimension::Task => self.task.as_ref(),
            RubricDimension::Context => self.context.as_ref(),
            RubricDimension::Format => self.format.as_ref(),
        }
    }

    /// Builds the detector set, replacing only overridden dimensions.
    #[must_use]
    pub fn detectors(&self) -> DetectorSet {
        RubricDimension::ALL.iter().fold(DetectorSet::default(), |detectors, dimension| {
            match self.patterns(*dimension) {
                Some(patterns) => detectors.with_patterns(*dimension, patterns),
                None => detectors,
            }
        })
    }

    /// Validates rubric overrides.
    fn validate(&self) -> Result<(), ConfigError> {
        for dimension in RubricDimension::ALL {
            let Some(patterns) = self.patterns(dimension) else {
                continue;
            };
            let field = format!("rubric.{}", dimension.label().to_lowercase());
            if patterns.is_empty() || patterns.len() > MAX_RUBRIC_PATTERNS {
                return Err(ConfigError::Invalid(format!(
                    "{field} must list 1 to {MAX_RUBRIC_PATTERNS} patterns"
                )));
            }
            if patterns
                .iter()
                .any(|pattern| pattern.is_empty() || pattern.len() > MAX_RUBRIC_PATTERN_LENGTH)
            {
                return Err(ConfigError::Invalid(format!(
                    "{field} patterns must be 1 to {MAX_RUBRIC_PATTERN_LENGTH} bytes"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Whether audit events are emitted.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional JSONL file path; stderr is used when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("audit.path must be non-empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller, environment, or default name.
fn resolve_path(path: Option<&Path>, env: &EnvLookup<'_>) -> Option<PathBuf> {
    if let Some(path) = path {
        return Some(path.to_path_buf());
    }
    if let Some(env_path) = non_empty(env(CONFIG_ENV_VAR)) {
        return Some(PathBuf::from(env_path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    default.is_file().then_some(default)
}

/// Enforces path length limits before touching the filesystem.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Drops empty or whitespace-only values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Validates an optional navigation link.
fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_URL_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(ConfigError::Invalid(format!("{field} must use http:// or https://")));
    }
    Ok(())
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default body size limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default access-code length limit.
const fn default_max_code_chars() -> usize {
    DEFAULT_MAX_CODE_CHARS
}

/// Default cookie name.
fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

/// Default session lifetime.
const fn default_ttl_minutes() -> u32 {
    DEFAULT_SESSION_TTL_MINUTES
}

/// Default submission length limit.
const fn default_max_answer_chars() -> usize {
    DEFAULT_MAX_ANSWER_CHARS
}

/// Default word-count gate.
const fn default_min_words_gate() -> usize {
    DEFAULT_MIN_WORDS_GATE
}

/// Default upper word-count guidance.
const fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

/// Serde default for `true` flags.
const fn default_true() -> bool {
    true
}
