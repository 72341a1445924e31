// crates/rubric-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Access Gate
// Description: Shared-code unlock and signed, time-bounded session tokens.
// Purpose: Authorize marking requests without server-side session storage.
// Dependencies: base64, hmac, serde_json, sha2, subtle, thiserror
// ============================================================================

//! ## Overview
//! The gate has two states. A caller is unauthenticated until it presents the
//! configured access code, at which point the gate issues a token that
//! encodes an expiry instant and is signed with HMAC-SHA256. Every protected
//! request re-validates the token against a caller-supplied "now"; expiry,
//! tampering, and absence all collapse to the same unauthenticated state.
//!
//! Token wire format: `v1.<base64url(claims json)>.<base64url(hmac)>`.
//!
//! Security posture: codes and tokens are untrusted input. Rejection reasons
//! are available for audit logs only and must not reach the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::Hmac;
use hmac::Mac;
use serde::Deserialize;
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::core::text::clamp_chars;
use crate::core::time::UnixSeconds;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default session lifetime in minutes.
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 60;
/// Default maximum access-code length in characters.
pub const DEFAULT_MAX_CODE_CHARS: usize = 80;
/// Tokens longer than this are rejected before any decoding.
const MAX_TOKEN_BYTES: usize = 1024;
/// Version prefix for the token wire format.
const TOKEN_VERSION: &str = "v1";

/// HMAC-SHA256 instance used for token signatures.
type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Access gate errors.
#[derive(Debug, Error)]
pub enum GateError {
    /// Gate configuration is unusable.
    #[error("invalid gate config: {0}")]
    Config(String),
    /// Submitted access code was empty, oversized, or wrong.
    #[error("invalid access code")]
    InvalidCode,
    /// Session claims could not be encoded.
    #[error("session encoding failed: {0}")]
    Encoding(String),
}

/// Why a presented session token was not accepted.
///
/// # Invariants
/// - Variants are stable audit labels; callers only ever see "reauthorize".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionRejection {
    /// No token was presented.
    #[error("missing")]
    Missing,
    /// Token did not parse.
    #[error("malformed")]
    Malformed,
    /// Token signature did not verify.
    #[error("bad_signature")]
    BadSignature,
    /// Token expiry is not after now.
    #[error("expired")]
    Expired,
}

impl SessionRejection {
    /// Returns a stable label for this rejection reason.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
        }
    }
}

// ============================================================================
// SECTION: Tokens
// ============================================================================

/// Claims carried inside a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionClaims {
    /// Expiry instant; the token is valid strictly before it.
    pub exp: UnixSeconds,
}

/// Opaque, signed session credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns the serialized token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the serialized form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

// ============================================================================
// SECTION: Code Check
// ============================================================================

/// Compares a submitted code with the configured code after trimming.
///
/// Empty submissions never match. The byte comparison is constant-time.
#[must_use]
pub fn check_code(submitted: &str, configured: &str) -> bool {
    let submitted = submitted.trim();
    if submitted.is_empty() || configured.is_empty() {
        return false;
    }
    submitted.as_bytes().ct_eq(configured.as_bytes()).into()
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Immutable gate configuration.
#[derive(Clone)]
pub struct GateConfig {
    /// Shared access code.
    pub access_code: String,
    /// HMAC key used to sign session tokens.
    pub signing_key: Vec<u8>,
    /// Session lifetime in minutes.
    pub session_ttl_minutes: u32,
    /// Submitted codes are truncated to this many characters.
    pub max_code_chars: usize,
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("access_code", &"<redacted>")
            .field("signing_key", &"<redacted>")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .field("max_code_chars", &self.max_code_chars)
            .finish()
    }
}

/// Stateless access gate.
#[derive(Debug, Clone)]
pub struct AccessGate {
    /// Gate configuration.
    config: GateConfig,
}

impl AccessGate {
    /// Builds a gate, rejecting unusable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Config`] when the code or key is empty or a limit is zero.
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        if config.access_code.trim().is_empty() {
            return Err(GateError::Config("access code must be non-empty".to_string()));
        }
        if config.signing_key.is_empty() {
            return Err(GateError::Config("signing key must be non-empty".to_string()));
        }
        if config.session_ttl_minutes == 0 {
            return Err(GateError::Config("session ttl must be at least one minute".to_string()));
        }
        if config.max_code_chars == 0 {
            return Err(GateError::Config("max code length must be non-zero".to_string()));
        }
        Ok(Self {
            config,
        })
    }

    /// Checks a submitted code against the configured one.
    #[must_use]
    pub fn check_code(&self, submitted: &str) -> bool {
        check_code(clamp_chars(submitted, self.config.max_code_chars), &self.config.access_code)
    }

    /// Unauthenticated to authenticated transition: checks the code and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidCode`] for any non-matching input.
    pub fn unlock(&self, submitted: &str, now: UnixSeconds) -> Result<SessionToken, GateError> {
        if !self.check_code(submitted) {
            return Err(GateError::InvalidCode);
        }
        self.issue_session(now)
    }

    /// Issues a token expiring `session_ttl_minutes` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Encoding`] when the claims cannot be serialized.
    pub fn issue_session(&self, now: UnixSeconds) -> Result<SessionToken, GateError> {
        let claims = SessionClaims {
            exp: now.plus_minutes(self.config.session_ttl_minutes),
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|err| GateError::Encoding(err.to_string()))?;
        let signing_input = format!("{TOKEN_VERSION}.{}", URL_SAFE_NO_PAD.encode(payload));
        let mut mac = self.mac().map_err(|err| GateError::Encoding(err.to_string()))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(SessionToken(format!("{signing_input}.{signature}")))
    }

    /// Verifies a presented token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionRejection`] naming why the token is not valid at `now`.
    pub fn inspect(
        &self,
        token: Option<&str>,
        now: UnixSeconds,
    ) -> Result<SessionClaims, SessionRejection> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(SessionRejection::Missing)?;
        if token.len() > MAX_TOKEN_BYTES {
            return Err(SessionRejection::Malformed);
        }
        let (signing_input, signature) =
            token.rsplit_once('.').ok_or(SessionRejection::Malformed)?;
        let (version, payload) =
            signing_input.split_once('.').ok_or(SessionRejection::Malformed)?;
        if version != TOKEN_VERSION {
            return Err(SessionRejection::Malformed);
        }
        let signature =
            URL_SAFE_NO_PAD.decode(signature).map_err(|_| SessionRejection::Malformed)?;
        let mut mac = self.mac().map_err(|_| SessionRejection::BadSignature)?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature).map_err(|_| SessionRejection::BadSignature)?;

        let payload = URL_SAFE_NO_PAD.decode(payload).map_err(|_| SessionRejection::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| SessionRejection::Malformed)?;
        if claims.exp <= now {
            return Err(SessionRejection::Expired);
        }
        Ok(claims)
    }

    /// Returns true when `token` is present, authentic, and unexpired at `now`.
    #[must_use]
    pub fn validate(&self, token: Option<&str>, now: UnixSeconds) -> bool {
        self.inspect(token, now).is_ok()
    }

    /// Builds a keyed MAC instance.
    fn mac(&self) -> Result<HmacSha256, GateError> {
        HmacSha256::new_from_slice(&self.config.signing_key)
            .map_err(|_| GateError::Config("signing key rejected".to_string()))
    }
}
