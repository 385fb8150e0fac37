use super::ScenarioFailure;

/// State handed from one scenario to the next within a single suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Written by the creating scenario, read by edit and delete
    pub last_created_story_id: Option<String>,
    /// Title the listing is expected to show after an edit
    pub expected_title: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self, story_id: impl Into<String>) {
        self.last_created_story_id = Some(story_id.into());
    }

    /// The stored story id, or a precondition failure naming what is missing.
    pub fn require_story_id(&self) -> Result<&str, ScenarioFailure> {
        self.last_created_story_id.as_deref().ok_or_else(|| {
            ScenarioFailure::precondition("No story ID stored from previous scenario.")
        })
    }

    pub fn require_expected_title(&self) -> Result<&str, ScenarioFailure> {
        self.expected_title.as_deref().ok_or_else(|| {
            ScenarioFailure::precondition("No edited title stored from previous scenario.")
        })
    }
}
