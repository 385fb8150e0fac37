//! Assertion helpers shared by scenarios.

use reqwest::StatusCode;

use super::{ScenarioFailure, ScenarioResult};
use crate::client::ApiReply;
use crate::models::{ApiResponse, Story};

pub fn expect_status(reply: &ApiReply, expected: StatusCode) -> ScenarioResult {
    if reply.status == expected {
        return Ok(());
    }
    Err(ScenarioFailure::UnexpectedStatus {
        expected: expected.as_u16(),
        actual: reply.status.as_u16(),
        body: reply.body.clone(),
    })
}

pub fn expect_message(response: &ApiResponse, expected: &str) -> ScenarioResult {
    if response.msg.as_deref() == Some(expected) {
        return Ok(());
    }
    Err(ScenarioFailure::UnexpectedMessage {
        expected: expected.to_string(),
        actual: response.msg.clone(),
    })
}

/// Status first, then decode, then message.
pub fn expect_reply(
    reply: &ApiReply,
    status: StatusCode,
    message: &str,
) -> Result<ApiResponse, ScenarioFailure> {
    expect_status(reply, status)?;
    let response = reply.api_response()?;
    expect_message(&response, message)?;
    Ok(response)
}

/// A listing that is present and has at least one entry.
pub fn expect_non_empty_listing(reply: &ApiReply) -> Result<Vec<Story>, ScenarioFailure> {
    expect_status(reply, StatusCode::OK)?;
    let stories = reply
        .stories()?
        .ok_or_else(|| ScenarioFailure::assertion("Response must not be null."))?;
    if stories.is_empty() {
        return Err(ScenarioFailure::assertion(
            "Response must contain at least one story.",
        ));
    }
    Ok(stories)
}
