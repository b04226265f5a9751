//! Test utilities shared across modules.
//!
//! [`ScriptedApi`] stands in for the orchestration API: it answers from
//! canned responses and records every call so tests can assert on traffic.

use crate::api::{OrchestratorApi, Run, RunConfig, RunRequest, RunStatus, ServiceInfo};
use crate::error::{DashError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A call observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListRuns,
    Submit(RunRequest),
    Status(String),
    Delete(String),
    ServiceInfo,
}

#[derive(Debug, Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<ApiCall>>,
    runs: Option<Vec<Run>>,
    submit: Option<Run>,
    statuses: Mutex<VecDeque<Run>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(mut self, runs: Vec<Run>) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_submit(mut self, run: Run) -> Self {
        self.submit = Some(run);
        self
    }

    /// Responses returned by successive status calls, in order.
    pub fn with_statuses(self, statuses: Vec<Run>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn unscripted(what: &str) -> DashError {
        DashError::Api {
            status: 500,
            message: format!("no scripted response for {}", what),
        }
    }
}

impl OrchestratorApi for ScriptedApi {
    fn list_runs(&self) -> Result<Vec<Run>> {
        self.record(ApiCall::ListRuns);
        self.runs.clone().ok_or_else(|| Self::unscripted("list_runs"))
    }

    fn submit_run(&self, request: &RunRequest) -> Result<Run> {
        self.record(ApiCall::Submit(request.clone()));
        self.submit.clone().ok_or_else(|| Self::unscripted("submit_run"))
    }

    fn run_status(&self, run_id: &str) -> Result<Run> {
        self.record(ApiCall::Status(run_id.to_string()));
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Self::unscripted("run_status"))
    }

    fn delete_run(&self, run_id: &str) -> Result<()> {
        self.record(ApiCall::Delete(run_id.to_string()));
        Ok(())
    }

    fn service_info(&self) -> Result<ServiceInfo> {
        self.record(ApiCall::ServiceInfo);
        Ok(ServiceInfo {
            message: "scripted".to_string(),
            version: "0.0.0".to_string(),
            endpoints: Default::default(),
        })
    }
}

/// A run with only an id and a status.
pub fn run(run_id: &str, status: RunStatus) -> Run {
    Run {
        run_id: run_id.to_string(),
        status,
        result: None,
        created_at: "2025-03-01T10:00:00".to_string(),
        completed_at: None,
        config: None,
    }
}

/// A run that echoes its originating query.
pub fn run_with_config(run_id: &str, status: RunStatus, input: &str) -> Run {
    Run {
        config: Some(RunConfig {
            input: input.to_string(),
            assistant_name: "web_researcher".to_string(),
            budget: "medium".to_string(),
            use_pro_tools: true,
        }),
        ..run(run_id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_api_records_calls_in_order() {
        let api = ScriptedApi::new().with_runs(Vec::new());
        api.list_runs().unwrap();
        api.run_status("abc").unwrap_err();
        api.delete_run("abc").unwrap();

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ListRuns,
                ApiCall::Status("abc".to_string()),
                ApiCall::Delete("abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_scripted_statuses_are_consumed() {
        let api = ScriptedApi::new().with_statuses(vec![
            run("abc", RunStatus::Running),
            run("abc", RunStatus::Completed),
        ]);
        assert_eq!(api.run_status("abc").unwrap().status, RunStatus::Running);
        assert_eq!(api.run_status("abc").unwrap().status, RunStatus::Completed);
        assert!(api.run_status("abc").is_err());
    }
}
