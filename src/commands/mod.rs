//! CLI command handlers for maestro-dash.
//!
//! Each command has its own module with a handler function. Handlers that
//! talk to the API take an [`OrchestratorApi`] so they can be driven by a
//! scripted client in tests.
//!
//! # Commands
//!
//! - [`dashboard`] - Terminal dashboard (the default)
//! - [`submit`] - Submit a run and follow it
//! - [`runs`] - List run history
//! - [`status`] - Show one run
//! - [`delete`] - Delete a run
//! - [`tools`] - Print the tool catalog
//! - [`config`] - Show the effective configuration
//! - [`ping`] - Check the API is reachable

mod config;
mod dashboard;
mod delete;
mod ping;
mod runs;
mod status;
mod submit;
mod tools;

pub use config::config_command;
pub use dashboard::dashboard_command;
pub use delete::delete_command;
pub use ping::ping_command;
pub use runs::runs_command;
pub use status::status_command;
pub use submit::{submit_command, SubmitOptions};
pub use tools::tools_command;

use crate::api::HttpOrchestrator;
use crate::config::Config;
use crate::error::Result;

/// Build the HTTP client for the configured API.
pub fn connect(config: &Config) -> Result<HttpOrchestrator> {
    HttpOrchestrator::new(&config.api_url, config.request_timeout())
}
