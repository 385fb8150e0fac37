//! The test session fixture.
//!
//! Opening a session authenticates exactly once and builds the one client
//! every scenario shares. The client is released when the session is dropped,
//! whatever the scenarios did.

use chrono::Utc;
use tracing::info;

use crate::client::{authenticate, StoryClient};
use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::report::SuiteReport;
use crate::scenario::{run_scenarios, SessionContext, Suite};

#[derive(Debug)]
pub struct TestSession {
    config: SuiteConfig,
    client: StoryClient,
}

impl TestSession {
    /// Authenticate and build the shared client. Fails fatally on any
    /// authentication problem; no scenario can run without a token.
    pub fn open(config: SuiteConfig) -> SuiteResult<Self> {
        let token = authenticate(&config)?;
        let client = StoryClient::new(&config, &token)?;
        info!(base_url = %config.base_url, user = %config.user_name, "Session opened");
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn client(&self) -> &StoryClient {
        &self.client
    }

    /// Run one suite with a fresh context. `only` narrows the run to the
    /// given scenario ids and whatever they depend on.
    pub fn run_suite(&self, suite: Suite, only: &[String]) -> SuiteResult<SuiteReport> {
        let started_at = Utc::now();
        let mut ctx = SessionContext::new();
        let outcomes = run_scenarios(&self.client, &suite.scenarios(), only, &mut ctx)?;

        Ok(SuiteReport {
            suite: suite.to_string(),
            base_url: self.config.base_url.clone(),
            started_at,
            outcomes,
        })
    }

    /// Release the client now instead of at end of scope.
    pub fn close(self) {}
}

impl Drop for TestSession {
    fn drop(&mut self) {
        info!(base_url = %self.config.base_url, "Session closed, releasing HTTP client");
    }
}
