//! JWT bootstrap: one unauthenticated login per session.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::http::create_http_client;
use super::AUTHENTICATION_PATH;
use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::models::AuthToken;

/// Log in with the configured credentials and return the bearer token.
///
/// Only an exact `200 OK` counts as success. Any other status is fatal and
/// the error carries the status, the raw body, and the user name tried.
pub fn authenticate(config: &SuiteConfig) -> SuiteResult<AuthToken> {
    let credentials = config.credentials();
    let client = create_http_client(config.request_timeout())?;
    let url = config.url(AUTHENTICATION_PATH);

    debug!(url = %url, user = %credentials.user_name, "Requesting access token");
    let response = client.post(&url).json(&credentials).send()?;
    let status = response.status();
    let body = response.text()?;

    if status != StatusCode::OK {
        warn!(status = status.as_u16(), user = %credentials.user_name, "Authentication rejected");
        return Err(SuiteError::Authentication {
            status: status.as_u16(),
            body,
            user_name: credentials.user_name,
        });
    }

    let token = extract_access_token(&body)?;
    info!(user = %credentials.user_name, "Authenticated");
    Ok(token)
}

/// Pull `accessToken` out of a login response body.
pub(crate) fn extract_access_token(body: &str) -> SuiteResult<AuthToken> {
    let content: Value = serde_json::from_str(body).map_err(SuiteError::InvalidAuthResponse)?;
    content
        .get("accessToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(AuthToken::new)
        .ok_or(SuiteError::TokenMissing)
}
