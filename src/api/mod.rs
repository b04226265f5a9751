//! Client side of the orchestration API.
//!
//! - [`types`] - request and response payloads
//! - [`http`] - blocking reqwest implementation of [`OrchestratorApi`]
//!
//! The dashboard only talks to the API through the [`OrchestratorApi`] trait,
//! so tests can substitute a scripted implementation.

pub mod http;
pub mod types;

pub use http::HttpOrchestrator;
pub use types::{
    Assistant, Budget, Run, RunConfig, RunList, RunRequest, RunStatus, ServiceInfo,
    DEFAULT_PERSONALITY,
};

use crate::error::Result;

/// Operations exposed by the orchestration API.
///
/// Every call returns an explicit outcome; callers decide whether a failure
/// is surfaced or only logged.
pub trait OrchestratorApi: Send + Sync {
    /// `GET /runs`
    fn list_runs(&self) -> Result<Vec<Run>>;

    /// `POST /run`
    fn submit_run(&self, request: &RunRequest) -> Result<Run>;

    /// `GET /status/{run_id}`
    fn run_status(&self, run_id: &str) -> Result<Run>;

    /// `DELETE /runs/{run_id}`
    fn delete_run(&self, run_id: &str) -> Result<()>;

    /// `GET /`
    fn service_info(&self) -> Result<ServiceInfo>;
}
