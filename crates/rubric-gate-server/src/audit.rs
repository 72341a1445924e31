// crates/rubric-gate-server/src/audit.rs
// ============================================================================
// Module: Gate Audit Logging
// Description: Structured audit events for unlock, session, and mark handling.
// Purpose: Emit redacted JSON-line audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Events carry
//! outcomes and counts only: submitted access codes, session tokens, and
//! answer text never appear in a payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event-specific fields.
    #[serde(flatten)]
    pub detail: AuditDetail,
}

/// Event-specific audit fields.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuditDetail {
    /// Server finished binding and is accepting requests.
    ServerStarted {
        /// Bound socket address.
        bind: String,
        /// Session lifetime in minutes.
        session_ttl_minutes: u32,
        /// Whether cookies carry the `Secure` attribute.
        secure_cookie: bool,
        /// Request body limit in bytes.
        max_body_bytes: usize,
    },
    /// Security posture warning.
    SecurityWarning {
        /// Warning kind label.
        kind: &'static str,
        /// Human-readable message.
        message: String,
    },
    /// Unlock attempt outcome.
    Unlock {
        /// Whether a session was issued.
        allowed: bool,
    },
    /// Mark request refused for lack of a valid session.
    SessionRejected {
        /// Route that refused the request.
        route: &'static str,
        /// Internal rejection reason label.
        reason: &'static str,
    },
    /// Mark request completed.
    Mark {
        /// Words counted after truncation.
        word_count: usize,
        /// Whether the submission was below the gate.
        gated: bool,
        /// Score for full verdicts.
        score: Option<u8>,
    },
}

impl AuditEvent {
    /// Builds an event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(event: &'static str, detail: AuditDetail) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            detail,
        }
    }

    /// Server startup event.
    #[must_use]
    pub fn server_started(
        bind: String,
        session_ttl_minutes: u32,
        secure_cookie: bool,
        max_body_bytes: usize,
    ) -> Self {
        Self::new(
            "server_started",
            AuditDetail::ServerStarted {
                bind,
                session_ttl_minutes,
                secure_cookie,
                max_body_bytes,
            },
        )
    }

    /// Security posture warning event.
    #[must_use]
    pub fn security_warning(kind: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            "security_warning",
            AuditDetail::SecurityWarning {
                kind,
                message: message.into(),
            },
        )
    }

    /// Unlock outcome event.
    #[must_use]
    pub fn unlock(allowed: bool) -> Self {
        Self::new(
            "unlock",
            AuditDetail::Unlock {
                allowed,
            },
        )
    }

    /// Session rejection event.
    #[must_use]
    pub fn session_rejected(route: &'static str, reason: &'static str) -> Self {
        Self::new(
            "session_rejected",
            AuditDetail::SessionRejected {
                route,
                reason,
            },
        )
    }

    /// Mark outcome event.
    #[must_use]
    pub fn mark(word_count: usize, gated: bool, score: Option<u8>) -> Self {
        Self::new(
            "mark",
            AuditDetail::Mark {
                word_count,
                gated,
                score,
            },
        )
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for gate events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
