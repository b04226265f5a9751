//! Delete command handler.

use crate::api::OrchestratorApi;
use crate::error::Result;
use crate::output::print_success;

/// Delete a run from the API's history.
pub fn delete_command(api: &dyn OrchestratorApi, run_id: &str) -> Result<()> {
    api.delete_run(run_id)?;
    tracing::info!(run_id = %run_id, "run deleted");
    print_success(&format!("Deleted run {}", run_id));
    Ok(())
}
