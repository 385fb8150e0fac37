//! Blocking HTTP client construction.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;

use crate::error::SuiteResult;
use crate::models::AuthToken;

pub(crate) const USER_AGENT: &str = "story-spoiler-tests";

/// Client for the unauthenticated login call.
pub(crate) fn create_http_client(timeout: Option<Duration>) -> SuiteResult<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Client that sends `Authorization: Bearer <token>` on every request.
pub(crate) fn create_authenticated_client(
    token: &AuthToken,
    timeout: Option<Duration>,
) -> SuiteResult<Client> {
    let mut auth_value = HeaderValue::from_str(&token.bearer())?;
    auth_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth_value);

    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
