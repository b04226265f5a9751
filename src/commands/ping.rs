//! Ping command handler.
//!
//! Calls the API root to check connectivity and show its version.

use crate::api::OrchestratorApi;
use crate::error::Result;
use crate::output::print_service_info;

pub fn ping_command(api: &dyn OrchestratorApi, api_url: &str) -> Result<()> {
    let info = api.service_info()?;
    print_service_info(api_url, &info);
    Ok(())
}
