pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod logging;
pub mod output;
pub mod signal;
pub mod tui;

#[cfg(test)]
mod test_utils;

pub use api::{HttpOrchestrator, OrchestratorApi, Run, RunRequest, RunStatus};
pub use config::Config;
pub use dashboard::{Dashboard, Effect, RunPoller};
pub use error::{DashError, Result};
