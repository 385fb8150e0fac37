//! Ordered scenarios against the Story API.
//!
//! A scenario is a plain function over the shared [`StoryClient`] and the
//! suite's [`SessionContext`]. Ordering comes from explicit `depends_on`
//! edges resolved by [`graph::ScenarioGraph`], never from declaration tricks.

pub mod catalog;
pub mod check;
pub mod context;
pub mod graph;
pub mod runner;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::client::story::RequestError;
use crate::client::StoryClient;

pub use context::SessionContext;
pub use graph::ScenarioGraph;
pub use runner::run_scenarios;

/// Why a single scenario did not pass.
#[derive(Debug, Error)]
pub enum ScenarioFailure {
    /// Required state from an earlier scenario is absent or unusable
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("Expected status code {expected}, got {actual}. Body: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Expected message {expected:?}, got {actual:?}")]
    UnexpectedMessage {
        expected: String,
        actual: Option<String>,
    },

    #[error("Response must contain {0}")]
    MissingField(&'static str),

    #[error("Response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Assertion(String),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Scenario panicked: {0}")]
    Panicked(String),
}

impl ScenarioFailure {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

impl From<RequestError> for ScenarioFailure {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidId(id_err) => Self::Precondition(id_err.to_string()),
            RequestError::Transport(e) => Self::Transport(e),
        }
    }
}

pub type ScenarioResult = Result<(), ScenarioFailure>;

pub type ScenarioFn = fn(&StoryClient, &mut SessionContext) -> ScenarioResult;

/// A named step with its declared predecessors.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioDef {
    pub id: &'static str,
    pub title: &'static str,
    pub depends_on: &'static [&'static str],
    pub run: ScenarioFn,
}

/// Independent scenario chains. Each runs with its own fresh context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// The seven create/edit/list/delete scenarios
    Standard,
    /// Create, edit, verify listing, delete, delete again
    Lifecycle,
}

impl Suite {
    pub const ALL: [Suite; 2] = [Suite::Standard, Suite::Lifecycle];

    pub fn scenarios(self) -> Vec<ScenarioDef> {
        match self {
            Suite::Standard => catalog::standard_suite(),
            Suite::Lifecycle => catalog::lifecycle_suite(),
        }
    }

    pub fn contains(self, id: &str) -> bool {
        self.scenarios().iter().any(|def| def.id == id)
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suite::Standard => write!(f, "standard"),
            Suite::Lifecycle => write!(f, "lifecycle"),
        }
    }
}

impl FromStr for Suite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Suite::Standard),
            "lifecycle" => Ok(Suite::Lifecycle),
            other => Err(format!("unknown suite '{other}' (expected standard or lifecycle)")),
        }
    }
}
