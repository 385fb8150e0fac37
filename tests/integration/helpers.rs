//! Shared mock server setup for integration tests

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use story_spoiler::config::{SuiteConfig, DEFAULT_PASSWORD, DEFAULT_USER_NAME};
use story_spoiler::session::TestSession;

pub const TOKEN: &str = "header.payload.signature";
pub const BEARER: &str = "Bearer header.payload.signature";
pub const UUID_PATTERN: &str = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// Config pointing at the mock server with the default credentials
pub fn config_for(server: &ServerGuard) -> SuiteConfig {
    SuiteConfig::default()
        .with_overrides(Some(server.url()), None)
        .expect("mock server URL should be a valid base URL")
}

/// Login mock that only accepts the default credentials
pub fn mock_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/User/Authentication")
        .match_body(Matcher::Json(json!({
            "userName": DEFAULT_USER_NAME,
            "password": DEFAULT_PASSWORD,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "accessToken": TOKEN, "userName": DEFAULT_USER_NAME }).to_string())
        .expect(1)
        .create()
}

pub fn open_session(server: &mut ServerGuard) -> TestSession {
    let _login = mock_login(server);
    TestSession::open(config_for(server)).expect("session should open against mock server")
}

/// JSON response mock that requires the bearer token
pub fn mock_json(
    server: &mut ServerGuard,
    method: &str,
    path: impl Into<Matcher>,
    status: usize,
    body: serde_json::Value,
) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", BEARER)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
}

/// Path matcher for `{prefix}/{random uuid}`
pub fn uuid_path(prefix: &str) -> Matcher {
    Matcher::Regex(format!("^{prefix}/{UUID_PATTERN}$"))
}
