//! HTTP round-trip tests for rubric-gate-server.
// crates/rubric-gate-server/tests/http_roundtrip.rs
// =============================================================================
// Module: HTTP Round-Trip Tests
// Description: Drive the server over a real socket with an HTTP client.
// Purpose: Ensure routing, cookies, and body limits hold end to end.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only HTTP assertions."
)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::COOKIE;
use reqwest::header::SET_COOKIE;
use rubric_gate_config::RubricGateConfig;
use rubric_gate_server::GateServer;
use rubric_gate_server::NoopAuditSink;
use rubric_gate_server::SystemClock;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;

const CONFIG: &str = "[server]\nmax_body_bytes = 2048\n\n[access]\ncode = \"ROME-PROMPT-01\"\n\n\
                      [session]\nsecret = \"0123456789abcdef0123456789abcdef\"\n\
                      secure_cookie = false\n";

async fn spawn_server() -> SocketAddr {
    let config = RubricGateConfig::from_toml_str(CONFIG).unwrap();
    let server =
        GateServer::with_parts(config, Arc::new(NoopAuditSink), Arc::new(SystemClock)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve_on(listener));
    addr
}

#[tokio::test]
async fn unlock_then_mark_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let denied = client
        .post(format!("http://{addr}/api/mark"))
        .json(&json!({"answerText": "anything"}))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let unlocked = client
        .post(format!("http://{addr}/api/unlock"))
        .json(&json!({"code": "ROME-PROMPT-01"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unlocked.status(), StatusCode::OK);
    let set_cookie = unlocked.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(!set_cookie.contains("Secure"));
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let marked = client
        .post(format!("http://{addr}/api/mark"))
        .header(COOKIE, pair)
        .json(&json!({"answerText": "You are a venue scout."}))
        .send()
        .await
        .unwrap();
    assert_eq!(marked.status(), StatusCode::OK);
    let body: Value = marked.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["result"]["gated"], json!(true));
    assert_eq!(body["result"]["wordCount"], json!(5));
}

#[tokio::test]
async fn config_and_health_are_public() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let config: Value =
        client.get(format!("http://{addr}/api/config")).send().await.unwrap().json().await.unwrap();
    assert_eq!(config["ok"], json!(true));
    assert_eq!(config["minWordsGate"], json!(20));
    let health: Value =
        client.get(format!("http://{addr}/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health, json!({"status": "ok"}));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/unlock"))
        .header("content-type", "application/json")
        .body(format!("{{\"code\":\"{}\"}}", "a".repeat(4096)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
