//! Dashboard command handler.
//!
//! Launches the terminal dashboard against the configured API.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::logging::init_file_logging;
use crate::tui::run_dashboard;

use super::connect;

/// Launch the dashboard.
///
/// The dashboard owns the terminal, so logs go to a file in the config
/// directory instead of stderr.
///
/// # Returns
///
/// * `Ok(())` when the user exits the dashboard
/// * `Err(DashError)` if logging, the client, or the terminal fails to initialize
pub fn dashboard_command(config: &Config) -> Result<()> {
    let log_path = init_file_logging()?;
    tracing::info!(log = %log_path.display(), "logging to file");

    let api = Arc::new(connect(config)?);
    run_dashboard(config, api)
}
