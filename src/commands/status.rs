//! Status command handler.
//!
//! Displays a single run, including its result once finished.

use crate::api::OrchestratorApi;
use crate::error::Result;
use crate::output::print_run_detail;

/// Fetch and print one run.
pub fn status_command(api: &dyn OrchestratorApi, run_id: &str) -> Result<()> {
    let run = api.run_status(run_id)?;
    print_run_detail(&run);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RunStatus;
    use crate::test_utils::{run, ApiCall, ScriptedApi};

    #[test]
    fn test_status_command_fetches_requested_run() {
        let api = ScriptedApi::new().with_statuses(vec![run("abc", RunStatus::Running)]);
        status_command(&api, "abc").unwrap();
        assert_eq!(api.calls(), vec![ApiCall::Status("abc".to_string())]);
    }

    #[test]
    fn test_status_command_unknown_run_is_error() {
        let api = ScriptedApi::new();
        assert!(status_command(&api, "missing").is_err());
    }
}
