//! Authenticated Story API client.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use super::http::create_authenticated_client;
use super::{ALL_PATH, CREATE_PATH, DELETE_PATH, EDIT_PATH};
use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::models::{ApiResponse, AuthToken, Story, StoryRequest};
use crate::validation::{validate_story_id, IdError};

/// Why a request could not produce an [`ApiReply`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Status and raw body of a completed request, whatever the status was.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: String,
}

impl ApiReply {
    pub fn api_response(&self) -> Result<ApiResponse, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Decode a listing. `Ok(None)` means the body was JSON `null`.
    pub fn stories(&self) -> Result<Option<Vec<Story>>, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// One authenticated client shared by every scenario of a session.
#[derive(Debug)]
pub struct StoryClient {
    http: Client,
    base_url: String,
}

impl StoryClient {
    pub fn new(config: &SuiteConfig, token: &AuthToken) -> SuiteResult<Self> {
        let http = create_authenticated_client(token, config.request_timeout())?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn create(&self, story: &StoryRequest) -> Result<ApiReply, RequestError> {
        let url = self.url(CREATE_PATH);
        self.execute("POST", self.http.post(url).json(story))
    }

    pub fn edit(&self, id: &str, story: &StoryRequest) -> Result<ApiReply, RequestError> {
        validate_story_id(id)?;
        let url = format!("{}/{id}", self.url(EDIT_PATH));
        self.execute("PUT", self.http.put(url).json(story))
    }

    pub fn list(&self) -> Result<ApiReply, RequestError> {
        let url = self.url(ALL_PATH);
        self.execute("GET", self.http.get(url))
    }

    pub fn delete(&self, id: &str) -> Result<ApiReply, RequestError> {
        validate_story_id(id)?;
        let url = format!("{}/{id}", self.url(DELETE_PATH));
        self.execute("DELETE", self.http.delete(url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn execute(&self, method: &str, request: RequestBuilder) -> Result<ApiReply, RequestError> {
        let response = request.send()?;
        let status = response.status();
        debug!(method, url = %response.url(), status = status.as_u16(), "Story API call");
        let body = response.text()?;
        Ok(ApiReply { status, body })
    }
}
