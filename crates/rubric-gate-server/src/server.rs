// crates/rubric-gate-server/src/server.rs
// ============================================================================
// Module: Gate HTTP Server
// Description: axum routes for task metadata, unlock, and marking.
// Purpose: Bind the access gate and marking engine to JSON endpoints.
// Dependencies: rubric-gate-core, rubric-gate-config, axum, tokio
// ============================================================================

//! ## Overview
//! The server exposes four routes:
//!
//! - `GET /api/config` returns the task metadata.
//! - `POST /api/unlock` exchanges the access code for a session cookie.
//! - `POST /api/mark` marks a submission for holders of a valid session.
//! - `GET /health` reports liveness.
//!
//! Unlock failures all look the same to the caller (`invalid_code`), and every
//! session failure on mark is reported as `unauthorized`; the internal reason
//! goes to the audit sink only. Request bodies are capped by
//! `server.max_body_bytes`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use rand::RngCore;
use rand::rngs::OsRng;
use rubric_gate_config::AuditConfig;
use rubric_gate_config::RubricGateConfig;
use rubric_gate_core::AccessGate;
use rubric_gate_core::GateError;
use rubric_gate_core::MarkingEngine;
use rubric_gate_core::SessionRejection;
use rubric_gate_core::TaskMetadata;
use rubric_gate_core::Verdict;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::audit::AuditEvent;
use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::cookie::SessionCookie;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bytes of randomness used when no session secret is configured.
const EPHEMERAL_SECRET_BYTES: usize = 32;
/// Route label used in mark audit events.
const MARK_ROUTE: &str = "/api/mark";

// ============================================================================
// SECTION: Gate Server
// ============================================================================

/// HTTP server instance.
pub struct GateServer {
    /// Server configuration.
    config: RubricGateConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl GateServer {
    /// Builds a server from configuration using the configured audit sink and
    /// the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid or the audit sink
    /// cannot be opened.
    pub fn from_config(config: RubricGateConfig) -> Result<Self, ServerError> {
        let audit = build_audit_sink(&config.audit)?;
        Self::with_parts(config, audit, Arc::new(SystemClock))
    }

    /// Builds a server with an explicit audit sink and clock.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid.
    pub fn with_parts(
        mut config: RubricGateConfig,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let state = build_server_state(&config, audit, clock)?;
        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }

    /// Returns the application router.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state), self.config.server.max_body_bytes)
    }

    /// Binds the configured address and serves until interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        self.serve_on(listener).await
    }

    /// Serves on an already bound listener until interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when serving fails.
    pub async fn serve_on(self, listener: TcpListener) -> Result<(), ServerError> {
        let local = listener
            .local_addr()
            .map_err(|_| ServerError::Transport("listener address unavailable".to_string()))?;
        let app = self.router();
        self.state.audit.record(&AuditEvent::server_started(
            local.to_string(),
            self.config.session.ttl_minutes,
            self.config.session.secure_cookie,
            self.config.server.max_body_bytes,
        ));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(Arc::clone(&self.state.audit)))
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Shared state for HTTP handlers.
struct ServerState {
    /// Access gate issuing and checking sessions.
    gate: AccessGate,
    /// Marking engine.
    engine: MarkingEngine,
    /// Task metadata served by `/api/config`.
    metadata: TaskMetadata,
    /// Session cookie attributes.
    cookie: SessionCookie,
    /// Host clock.
    clock: Arc<dyn Clock>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
}

/// Builds handler state from validated configuration.
fn build_server_state(
    config: &RubricGateConfig,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
) -> Result<ServerState, ServerError> {
    let signing_key = resolve_signing_key(config, audit.as_ref());
    let gate_config =
        config.gate_config(signing_key).map_err(|err| ServerError::Config(err.to_string()))?;
    let gate = AccessGate::new(gate_config).map_err(|err| ServerError::Init(err.to_string()))?;
    if !config.session.secure_cookie {
        audit.record(&AuditEvent::security_warning(
            "insecure_cookie",
            "session cookie is sent without the Secure attribute; use only behind plain-http \
             development setups",
        ));
    }
    Ok(ServerState {
        gate,
        engine: MarkingEngine::new(config.marking_config()),
        metadata: config.task_metadata(),
        cookie: SessionCookie::new(
            config.session.cookie_name.clone(),
            config.session.ttl_minutes,
            config.session.secure_cookie,
        ),
        clock,
        audit,
    })
}

/// Uses the configured secret or generates a per-process key.
fn resolve_signing_key(config: &RubricGateConfig, audit: &dyn AuditSink) -> Vec<u8> {
    if let Some(secret) = &config.session.secret {
        return secret.as_bytes().to_vec();
    }
    let mut key = vec![0u8; EPHEMERAL_SECRET_BYTES];
    OsRng.fill_bytes(&mut key);
    audit.record(&AuditEvent::security_warning(
        "ephemeral_session_secret",
        "no session secret configured; sessions will not survive a restart",
    ));
    key
}

/// Builds the audit sink described by configuration.
///
/// # Errors
///
/// Returns [`ServerError::Init`] when the audit file cannot be opened.
pub fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(path)
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Builds the route table.
fn build_router(state: Arc<ServerState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/config", get(handle_config))
        .route("/api/unlock", post(handle_unlock))
        .route("/api/mark", post(handle_mark))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal(audit: Arc<dyn AuditSink>) {
    wait_for_shutdown(tokio::signal::ctrl_c(), audit.as_ref()).await;
}

/// Waits for `signal`. A signal that fails to install is audited and the
/// server keeps running until the process is killed.
async fn wait_for_shutdown<F>(signal: F, audit: &dyn AuditSink)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        audit.record(&AuditEvent::security_warning(
            "shutdown_signal_unavailable",
            format!("graceful shutdown disabled: {err}"),
        ));
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Unlock request body.
#[derive(Debug, Default, Deserialize)]
struct UnlockRequest {
    /// Submitted access code.
    #[serde(default)]
    code: Option<String>,
}

/// Mark request body.
///
/// Fields stay untyped so scalar answers can be coerced to text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkRequest {
    /// Submitted answer.
    #[serde(default)]
    answer_text: Option<Value>,
    /// Legacy field name for the submitted answer.
    #[serde(default)]
    answer: Option<Value>,
}

impl MarkRequest {
    /// Resolves the answer text, falling back to `answer` when `answerText`
    /// is absent, null, or empty.
    fn into_answer(self) -> Result<String, ApiError> {
        match answer_field(self.answer_text)? {
            Some(text) => Ok(text),
            None => Ok(answer_field(self.answer)?.unwrap_or_default()),
        }
    }
}

/// Coerces one answer field to text. Structured values are rejected.
fn answer_field(value: Option<Value>) -> Result<Option<String>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text).filter(|text| !text.is_empty())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(ApiError::BadRequest),
    }
}

/// `/api/config` response body.
#[derive(Serialize)]
struct ConfigResponse<'a> {
    /// Success flag.
    ok: bool,
    /// Task metadata fields.
    #[serde(flatten)]
    task: &'a TaskMetadata,
}

/// Bare success response body.
#[derive(Serialize)]
struct OkResponse {
    /// Success flag.
    ok: bool,
}

/// `/api/mark` response body.
#[derive(Serialize)]
struct MarkResponse<'a> {
    /// Success flag.
    ok: bool,
    /// Marking verdict.
    result: &'a Verdict,
}

/// `/health` response body.
#[derive(Serialize)]
struct HealthResponse {
    /// Liveness label.
    status: &'static str,
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    /// Always false.
    ok: bool,
    /// Stable error label.
    error: &'static str,
}

/// Client-visible API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiError {
    /// Unlock refused.
    InvalidCode,
    /// No valid session; the client must unlock again.
    Unauthorized,
    /// Request body was not valid JSON for the route.
    BadRequest,
    /// Unexpected server-side failure.
    Internal,
}

impl ApiError {
    /// Returns the HTTP status and error label.
    const fn parts(self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidCode => (StatusCode::UNAUTHORIZED, "invalid_code"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::BadRequest => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        (
            status,
            Json(ErrorResponse {
                ok: false,
                error,
            }),
        )
            .into_response()
    }
}

/// Parses a JSON body, treating an empty body as an empty object.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves task metadata.
async fn handle_config(State(state): State<Arc<ServerState>>) -> Response {
    Json(ConfigResponse {
        ok: true,
        task: &state.metadata,
    })
    .into_response()
}

/// Exchanges an access code for a session cookie.
async fn handle_unlock(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let code = parse_body::<UnlockRequest>(&body)
        .ok()
        .and_then(|request| request.code)
        .unwrap_or_default();
    let token = match state.gate.unlock(&code, state.clock.now()) {
        Ok(token) => token,
        Err(GateError::InvalidCode) => {
            state.audit.record(&AuditEvent::unlock(false));
            return ApiError::InvalidCode.into_response();
        }
        Err(_) => return ApiError::Internal.into_response(),
    };
    let Ok(cookie) = HeaderValue::from_str(&state.cookie.render(token.as_str())) else {
        return ApiError::Internal.into_response();
    };
    state.audit.record(&AuditEvent::unlock(true));
    (
        [(SET_COOKIE, cookie)],
        Json(OkResponse {
            ok: true,
        }),
    )
        .into_response()
}

/// Accepts the request when any session cookie it carries is valid.
///
/// Browsers may send a stale duplicate alongside the current cookie, so every
/// candidate is tried; the first rejection is reported when none passes.
fn authorize_session(state: &ServerState, headers: &HeaderMap) -> Result<(), SessionRejection> {
    let now = state.clock.now();
    let mut first_rejection = None;
    for token in state.cookie.values(headers) {
        match state.gate.inspect(Some(token), now) {
            Ok(_) => return Ok(()),
            Err(rejection) => {
                first_rejection.get_or_insert(rejection);
            }
        }
    }
    Err(first_rejection.unwrap_or(SessionRejection::Missing))
}

/// Marks a submission for a caller holding a valid session.
async fn handle_mark(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(rejection) = authorize_session(&state, &headers) {
        state.audit.record(&AuditEvent::session_rejected(MARK_ROUTE, rejection.label()));
        return ApiError::Unauthorized.into_response();
    }
    let answer = parse_body::<MarkRequest>(&body)
        .map_err(|_| ApiError::BadRequest)
        .and_then(MarkRequest::into_answer);
    let answer = match answer {
        Ok(answer) => answer,
        Err(err) => return err.into_response(),
    };
    let verdict = state.engine.mark(&answer);
    state.audit.record(&AuditEvent::mark(
        verdict.word_count(),
        verdict.is_gated(),
        verdict.score(),
    ));
    Json(MarkResponse {
        ok: true,
        result: &verdict,
    })
    .into_response()
}

/// Reports liveness.
async fn handle_health() -> Response {
    Json(HealthResponse {
        status: "ok",
    })
    .into_response()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
