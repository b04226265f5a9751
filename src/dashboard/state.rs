//! Dashboard state and its reactions to user actions and API outcomes.
//!
//! The dashboard never performs I/O. User actions and timer ticks return
//! [`Effect`]s describing the API calls to make; the results come back as
//! [`ApiEvent`]s through [`Dashboard::apply`]. The TUI loop wires the two
//! together with [`super::worker::Worker`].

use super::form::AgentForm;
use super::poller::{RunPoller, RunProgress};
use crate::api::{Run, RunRequest};
use crate::error::{DashError, Result};
use std::time::{Duration, Instant};

/// An API call the dashboard wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRuns,
    SubmitRun(RunRequest),
    PollStatus(String),
    DeleteRun(String),
}

/// The outcome of an [`Effect`].
#[derive(Debug)]
pub enum ApiEvent {
    RunsLoaded(Result<Vec<Run>>),
    RunSubmitted {
        /// Whether the request asked the server to block until completion.
        waited: bool,
        outcome: Result<Run>,
    },
    StatusPolled {
        run_id: String,
        outcome: Result<Run>,
    },
    RunDeleted {
        run_id: String,
        outcome: Result<()>,
    },
}

#[derive(Debug)]
pub struct Dashboard {
    pub form: AgentForm,
    runs: Vec<Run>,
    current_run: Option<Run>,
    selected_run: Option<Run>,
    loading: bool,
    progress: RunProgress,
    poller: RunPoller,
    last_error: Option<String>,
}

impl Dashboard {
    pub fn new(form: AgentForm, poll_interval: Duration) -> Self {
        Self {
            form,
            runs: Vec::new(),
            current_run: None,
            selected_run: None,
            loading: false,
            progress: RunProgress::default(),
            poller: RunPoller::new(poll_interval),
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn current_run(&self) -> Option<&Run> {
        self.current_run.as_ref()
    }

    pub fn selected_run(&self) -> Option<&Run> {
        self.selected_run.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> RunProgress {
        self.progress
    }

    pub fn poller(&self) -> &RunPoller {
        &self.poller
    }

    /// Most recent API failure, kept for callers that choose to show it.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit is allowed only with a non-blank query and no submission in flight.
    pub fn can_submit(&self) -> bool {
        self.form.has_input() && !self.loading
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Effects to run when the dashboard opens.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![Effect::LoadRuns]
    }

    /// Manual refresh of the run history.
    pub fn refresh(&mut self) -> Effect {
        Effect::LoadRuns
    }

    /// Submit the form. Returns `None` while submission is disabled.
    pub fn submit(&mut self) -> Option<Effect> {
        if !self.can_submit() {
            return None;
        }
        // A poll for the previous run must not touch the new run's progress.
        if let Some(previous) = self.poller.active_run() {
            tracing::info!(run_id = %previous, "cancelling poll for replaced run");
            self.poller.cancel();
        }
        self.loading = true;
        self.progress.reset();
        Some(Effect::SubmitRun(self.form.request.clone()))
    }

    /// Open the details view for the run at `index` of the history list.
    pub fn open_details(&mut self, index: usize) -> bool {
        match self.runs.get(index) {
            Some(run) => {
                self.selected_run = Some(run.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_details(&mut self) {
        self.selected_run = None;
    }

    /// Delete the run at `index` of the history list.
    pub fn delete(&mut self, index: usize) -> Option<Effect> {
        self.runs
            .get(index)
            .map(|run| Effect::DeleteRun(run.run_id.clone()))
    }

    /// Advance timers. Returns a status fetch when one comes due.
    pub fn tick(&mut self, now: Instant) -> Option<Effect> {
        self.poller.tick(now).map(Effect::PollStatus)
    }

    /// Stop polling; results that arrive afterwards are ignored.
    pub fn shutdown(&mut self) {
        self.poller.cancel();
    }

    // ------------------------------------------------------------------
    // API outcomes
    // ------------------------------------------------------------------

    /// Apply the outcome of an API call, returning any follow-up effects.
    pub fn apply(&mut self, event: ApiEvent, now: Instant) -> Vec<Effect> {
        match event {
            ApiEvent::RunsLoaded(outcome) => {
                match outcome {
                    Ok(runs) => {
                        tracing::debug!(count = runs.len(), "run history loaded");
                        self.runs = runs;
                    }
                    Err(e) => self.record_failure("Failed to load runs", None, &e),
                }
                Vec::new()
            }
            ApiEvent::RunSubmitted { waited, outcome } => self.on_submitted(waited, outcome, now),
            ApiEvent::StatusPolled { run_id, outcome } => self.on_status(run_id, outcome),
            ApiEvent::RunDeleted { run_id, outcome } => match outcome {
                Ok(()) => {
                    tracing::info!(run_id = %run_id, "run deleted");
                    if self.selected_run.as_ref().map(|r| r.run_id.as_str()) == Some(&run_id) {
                        self.selected_run = None;
                    }
                    vec![Effect::LoadRuns]
                }
                Err(e) => {
                    self.record_failure("Failed to delete run", Some(&run_id), &e);
                    Vec::new()
                }
            },
        }
    }

    fn on_submitted(&mut self, waited: bool, outcome: Result<Run>, now: Instant) -> Vec<Effect> {
        self.loading = false;
        let run = match outcome {
            Ok(run) => run,
            Err(e) => {
                self.record_failure("Failed to submit run", None, &e);
                return Vec::new();
            }
        };

        tracing::info!(run_id = %run.run_id, status = %run.status, waited, "run submitted");
        let run_id = run.run_id.clone();
        self.current_run = Some(run);

        // The poller follows the current run; an older poll must not
        // overwrite it.
        if let Some(previous) = self.poller.active_run() {
            tracing::info!(run_id = %previous, "cancelling poll for replaced run");
            self.poller.cancel();
        }

        if waited {
            // The server blocked until the run finished; no status check here.
            self.progress.complete();
            vec![Effect::LoadRuns]
        } else {
            self.progress.reset();
            self.poller.start(run_id, now);
            Vec::new()
        }
    }

    fn on_status(&mut self, run_id: String, outcome: Result<Run>) -> Vec<Effect> {
        if !self.poller.resolve(&run_id) {
            tracing::debug!(run_id = %run_id, "discarding status for inactive poll");
            return Vec::new();
        }

        let run = match outcome {
            Ok(run) => run,
            Err(e) => {
                self.record_failure("Failed to poll run status", Some(&run_id), &e);
                self.poller.abandon();
                return Vec::new();
            }
        };

        let status = run.status.clone();
        self.current_run = Some(run);

        if status.is_terminal() {
            tracing::info!(run_id = %run_id, status = %status, "run finished");
            self.progress.complete();
            self.poller.finish();
            vec![Effect::LoadRuns]
        } else {
            if status == crate::api::RunStatus::Running {
                self.progress.advance();
            }
            Vec::new()
        }
    }

    fn record_failure(&mut self, context: &str, run_id: Option<&str>, error: &DashError) {
        let kind = if error.is_response_error() {
            "response"
        } else {
            "transport"
        };
        match run_id {
            Some(id) => tracing::error!(run_id = %id, kind, error = %error, "{}", context),
            None => tracing::error!(kind, error = %error, "{}", context),
        }
        self.last_error = Some(format!("{}: {}", context, error));
    }
}
