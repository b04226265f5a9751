//! Runs command handler.

use crate::api::OrchestratorApi;
use crate::error::Result;
use crate::output::print_runs_table;

/// Print the run history.
pub fn runs_command(api: &dyn OrchestratorApi) -> Result<()> {
    let runs = api.list_runs()?;
    tracing::debug!(count = runs.len(), "runs listed");
    print_runs_table(&runs);
    Ok(())
}
