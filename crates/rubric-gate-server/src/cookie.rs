// crates/rubric-gate-server/src/cookie.rs
// ============================================================================
// Module: Session Cookie Transport
// Description: Set-Cookie rendering and Cookie header lookup.
// Purpose: Carry the opaque session token between unlock and mark.
// Dependencies: axum
// ============================================================================

//! ## Overview
//! The gate issues opaque tokens; this module only moves them in and out of
//! HTTP headers. Cookies are always `HttpOnly` and `SameSite=Lax`, scoped to
//! `/`, and expire with the session lifetime.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie attributes for the session credential.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// Cookie name.
    name: String,
    /// Max-Age in seconds.
    max_age_secs: u64,
    /// Whether the `Secure` attribute is set.
    secure: bool,
}

impl SessionCookie {
    /// Builds cookie settings for a session lifetime in minutes.
    #[must_use]
    pub fn new(name: impl Into<String>, ttl_minutes: u32, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age_secs: u64::from(ttl_minutes) * 60,
            secure,
        }
    }

    /// Renders a `Set-Cookie` value carrying `token`.
    #[must_use]
    pub fn render(&self, token: &str) -> String {
        let mut value = format!(
            "{}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, self.max_age_secs
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }

    /// Yields every value sent under this cookie's name, in header order.
    pub fn values<'a>(&'a self, headers: &'a HeaderMap) -> impl Iterator<Item = &'a str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .map(|(_, value)| value.trim())
    }
}
