//! Runs dashboard effects against the API off the UI thread.

use super::state::{ApiEvent, Effect};
use crate::api::OrchestratorApi;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Perform one effect synchronously and package its outcome.
pub fn execute(api: &dyn OrchestratorApi, effect: Effect) -> ApiEvent {
    match effect {
        Effect::LoadRuns => ApiEvent::RunsLoaded(api.list_runs()),
        Effect::SubmitRun(request) => ApiEvent::RunSubmitted {
            waited: request.poll_for_completion,
            outcome: api.submit_run(&request),
        },
        Effect::PollStatus(run_id) => {
            let outcome = api.run_status(&run_id);
            ApiEvent::StatusPolled { run_id, outcome }
        }
        Effect::DeleteRun(run_id) => {
            let outcome = api.delete_run(&run_id);
            ApiEvent::RunDeleted { run_id, outcome }
        }
    }
}

/// Dispatches each effect on its own thread and delivers the outcomes
/// through a channel drained by the UI loop.
pub struct Worker {
    api: Arc<dyn OrchestratorApi>,
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
}

impl Worker {
    pub fn new(api: Arc<dyn OrchestratorApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { api, tx, rx }
    }

    pub fn dispatch(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = execute(api.as_ref(), effect);
            // The receiver is gone once the dashboard has closed.
            let _ = tx.send(event);
        });
    }

    pub fn dispatch_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Outcomes that have arrived since the last call, without blocking.
    pub fn drain(&self) -> Vec<ApiEvent> {
        self.rx.try_iter().collect()
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker").finish_non_exhaustive()
    }
}
