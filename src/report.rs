//! Per-scenario outcomes and how they are printed.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

use crate::scenario::ScenarioFailure;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Passed,
    Failed { reason: String },
    /// State an earlier scenario should have produced was missing
    PreconditionFailed { reason: String },
}

impl OutcomeStatus {
    pub fn from_result(result: &Result<(), ScenarioFailure>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(failure) if failure.is_precondition() => Self::PreconditionFailed {
                reason: failure.to_string(),
            },
            Err(failure) => Self::Failed {
                reason: failure.to_string(),
            },
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    pub fn new(id: &str, title: &str, status: OutcomeStatus, duration: Duration) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, id: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    pub fn render_text(&self) -> String {
        let mut out = format!(
            "{} {} against {}\n",
            "Suite".bold(),
            self.suite.cyan(),
            self.base_url
        );

        for (n, outcome) in self.outcomes.iter().enumerate() {
            let marker = match outcome.status {
                OutcomeStatus::Passed => "✓".green(),
                OutcomeStatus::Failed { .. } => "✗".red(),
                OutcomeStatus::PreconditionFailed { .. } => "✗".yellow(),
            };
            out.push_str(&format!(
                "  {marker} {:>2}. {} {} ({} ms)\n",
                n + 1,
                outcome.id.cyan(),
                outcome.title,
                outcome.duration_ms
            ));
            match &outcome.status {
                OutcomeStatus::Passed => {}
                OutcomeStatus::Failed { reason } => {
                    out.push_str(&format!("       {}\n", reason.red()));
                }
                OutcomeStatus::PreconditionFailed { reason } => {
                    out.push_str(&format!("       {}\n", reason.yellow()));
                }
            }
        }

        let summary = format!("{} passed, {} failed", self.passed(), self.failed());
        if self.is_success() {
            out.push_str(&format!("{}\n", summary.green()));
        } else {
            out.push_str(&format!("{}\n", summary.red()));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
