//! # Suite Error Types
//!
//! Fatal setup errors. Anything in here aborts the run before (or instead of)
//! executing scenarios; per-scenario assertion failures live in
//! [`crate::scenario::ScenarioFailure`].

use thiserror::Error;

/// Result type for session setup and configuration
pub type SuiteResult<T> = Result<T, SuiteError>;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to authenticate. Status: {status}, Content: {body}, UserName: {user_name}")]
    Authentication {
        status: u16,
        body: String,
        user_name: String,
    },

    #[error("Failed to retrieve JWT token.")]
    TokenMissing,

    #[error("Authentication response is not valid JSON: {0}")]
    InvalidAuthResponse(#[source] serde_json::Error),

    #[error("Access token cannot be used as a header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid scenario graph: {0}")]
    Graph(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SuiteError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph(message.into())
    }

    /// True for errors produced while obtaining the session token.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::TokenMissing | Self::InvalidAuthResponse(_)
        )
    }
}
