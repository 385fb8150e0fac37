//! Strictly sequential execution of an ordered scenario list.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};

use super::{ScenarioDef, ScenarioFailure, ScenarioGraph, SessionContext};
use crate::client::StoryClient;
use crate::error::SuiteResult;
use crate::report::{OutcomeStatus, ScenarioOutcome};

/// Run `defs` (or the dependency closure of `only`) one after another.
///
/// A failing scenario never stops the ones after it; each outcome is
/// recorded on its own.
pub fn run_scenarios(
    client: &StoryClient,
    defs: &[ScenarioDef],
    only: &[String],
    ctx: &mut SessionContext,
) -> SuiteResult<Vec<ScenarioOutcome>> {
    let graph = ScenarioGraph::build(defs)?;
    let order = if only.is_empty() {
        graph.execution_order()
    } else {
        graph.closure(only)?
    };

    Ok(order
        .into_iter()
        .map(|def| run_scenario(client, def, ctx))
        .collect())
}

pub fn run_scenario(
    client: &StoryClient,
    def: &ScenarioDef,
    ctx: &mut SessionContext,
) -> ScenarioOutcome {
    info!(scenario = def.id, "Running scenario");
    let started = Instant::now();

    let result = panic::catch_unwind(AssertUnwindSafe(|| (def.run)(client, ctx)))
        .unwrap_or_else(|payload| Err(ScenarioFailure::Panicked(panic_message(payload))));

    let status = OutcomeStatus::from_result(&result);
    if let Err(failure) = &result {
        warn!(scenario = def.id, error = %failure, "Scenario failed");
    }

    ScenarioOutcome::new(def.id, def.title, status, started.elapsed())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
