//! Shared fixtures for the mock-server tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use therange_sdk::{Config, Credentials, SdkError, TheRangeManager};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "test_user";
pub const PASSWORD: &str = "test_pass";
pub const TOKEN: &str = "session-token-123";

/// Base URL of the mock API, mirroring the `/rest/` prefix of the real hosts.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/rest/", server.uri())
}

pub fn manager(base_url: &str) -> Result<TheRangeManager, SdkError> {
    TheRangeManager::with_config(
        Credentials::new(USERNAME, PASSWORD),
        Config::custom(base_url, "mock"),
    )
}

/// Creates a manager and logs it in.
pub fn logged_in(base_url: &str) -> Result<TheRangeManager, SdkError> {
    let manager = manager(base_url)?;
    manager.authenticate()?;
    Ok(manager)
}

pub fn login_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("set-cookie", format!("ksi={}", TOKEN).as_str())
        .set_body_json(body)
}

/// Mounts a successful login returning supplier 12345 in `test` mode.
pub async fn mount_login(server: &MockServer) {
    mount_login_with(server, json!({"supplier_id": 12345, "mode": "test"})).await;
}

pub async fn mount_login_with(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/rest/authenticate.api"))
        .and(body_json(json!({"user": USERNAME, "pass": PASSWORD})))
        .respond_with(login_response(body))
        .expect(1)
        .mount(server)
        .await;
}
