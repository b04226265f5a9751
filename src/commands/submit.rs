//! Submit command handler.
//!
//! Sends a run to the API. Blocking submissions wait on the request itself;
//! background submissions return immediately and are then polled until the
//! run reaches a terminal status or the user presses Ctrl+C.

use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::{Duration, Instant};

use crate::api::{Assistant, Budget, OrchestratorApi, Run, RunRequest, RunStatus};
use crate::config::Config;
use crate::dashboard::{RunPoller, RunProgress};
use crate::error::Result;
use crate::output::{print_info, print_interrupted, print_run_detail};
use crate::signal::SignalHandler;

/// Longest sleep between checks of the Ctrl+C flag.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Flags of the `submit` subcommand. Unset values come from the config.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub input: String,
    pub assistant: Option<Assistant>,
    pub budget: Option<Budget>,
    pub personality: Option<String>,
    pub no_pro_tools: bool,
    pub background: bool,
}

impl SubmitOptions {
    /// Build the request, filling unset values from the config defaults.
    pub fn into_request(self, config: &Config) -> RunRequest {
        RunRequest {
            input: self.input,
            assistant_name: self.assistant.unwrap_or(config.assistant_name),
            assistant_personality: self
                .personality
                .unwrap_or_else(|| config.assistant_personality.clone()),
            budget: self.budget.unwrap_or(config.budget),
            use_pro_tools: config.use_pro_tools && !self.no_pro_tools,
            poll_for_completion: config.poll_for_completion && !self.background,
        }
    }
}

/// How following a background run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowOutcome {
    /// The run reached `completed` or `failed`.
    Finished(Run),
    /// Ctrl+C stopped the polling; the run continues on the server.
    Interrupted(Run),
}

/// Submit a run and print its outcome.
///
/// # Returns
///
/// * `Ok(())` once the run finished or polling was interrupted
/// * `Err(DashError)` if the request is invalid or any API call fails
pub fn submit_command(
    api: &dyn OrchestratorApi,
    config: &Config,
    options: SubmitOptions,
) -> Result<()> {
    let request = options.into_request(config);
    request.validate()?;

    if request.poll_for_completion {
        let spinner = waiting_spinner();
        let outcome = api.submit_run(&request);
        spinner.finish_and_clear();
        let run = outcome?;
        tracing::info!(run_id = %run.run_id, status = %run.status, "run finished");
        print_run_detail(&run);
        return Ok(());
    }

    let run = api.submit_run(&request)?;
    tracing::info!(run_id = %run.run_id, "run submitted in background");
    print_info(&format!("Submitted run {}", run.run_id));

    let signal = SignalHandler::new()?;
    let bar = progress_bar();
    let outcome = follow_run(api, run, config.poll_interval(), &signal, &bar);
    bar.finish_and_clear();

    match outcome? {
        FollowOutcome::Finished(run) => print_run_detail(&run),
        FollowOutcome::Interrupted(run) => print_interrupted(&run.run_id),
    }
    Ok(())
}

/// Poll a background run until it is terminal or Ctrl+C is pressed.
///
/// Progress follows the dashboard: +10 per `running` response, capped at
/// 90, and 100 once terminal. A failed status fetch stops polling and is
/// returned as the error.
pub fn follow_run(
    api: &dyn OrchestratorApi,
    run: Run,
    interval: Duration,
    signal: &SignalHandler,
    bar: &ProgressBar,
) -> Result<FollowOutcome> {
    let mut progress = RunProgress::default();
    let mut current = run;

    if current.status.is_terminal() {
        progress.complete();
        bar.set_position(u64::from(progress.percent()));
        return Ok(FollowOutcome::Finished(current));
    }

    let mut poller = RunPoller::new(interval);
    poller.start(current.run_id.clone(), Instant::now());
    bar.set_message(current.status.to_string());

    loop {
        if signal.is_shutdown_requested() {
            tracing::info!(run_id = %current.run_id, "stopped following run");
            poller.cancel();
            return Ok(FollowOutcome::Interrupted(current));
        }

        if let Some(run_id) = poller.tick(Instant::now()) {
            let outcome = api.run_status(&run_id);
            poller.resolve(&run_id);
            current = match outcome {
                Ok(run) => run,
                Err(e) => {
                    tracing::error!(run_id = %run_id, error = %e, "status check failed");
                    poller.abandon();
                    return Err(e);
                }
            };
            tracing::debug!(run_id = %run_id, status = %current.status, "status polled");

            if current.status.is_terminal() {
                progress.complete();
                poller.finish();
                bar.set_position(u64::from(progress.percent()));
                return Ok(FollowOutcome::Finished(current));
            }
            if current.status == RunStatus::Running {
                progress.advance();
            }
            bar.set_position(u64::from(progress.percent()));
            bar.set_message(current.status.to_string());
        }

        thread::sleep(SLEEP_SLICE.min(interval));
    }
}

fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars(SPINNER_CHARS)
        .template("{spinner:.cyan} Running agent [{elapsed_precise}]")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:30.green/white}] {pos:>3}% {msg}")
    {
        bar.set_style(style.progress_chars("█░").tick_chars(SPINNER_CHARS));
    }
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{run, ApiCall, ScriptedApi};

    const FAST: Duration = Duration::from_millis(1);

    fn options(input: &str) -> SubmitOptions {
        SubmitOptions {
            input: input.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_request_uses_config_defaults() {
        let config = Config {
            budget: Budget::High,
            assistant_personality: "terse".to_string(),
            ..Default::default()
        };
        let request = options("Find pricing").into_request(&config);
        assert_eq!(request.input, "Find pricing");
        assert_eq!(request.assistant_name, Assistant::WebResearcher);
        assert_eq!(request.budget, Budget::High);
        assert_eq!(request.assistant_personality, "terse");
        assert!(request.use_pro_tools);
        assert!(request.poll_for_completion);
    }

    #[test]
    fn test_into_request_flags_override_config() {
        let request = SubmitOptions {
            input: "q".to_string(),
            assistant: Some(Assistant::DataAnalyst),
            budget: Some(Budget::Low),
            personality: Some("formal".to_string()),
            no_pro_tools: true,
            background: true,
        }
        .into_request(&Config::default());
        assert_eq!(request.assistant_name, Assistant::DataAnalyst);
        assert_eq!(request.budget, Budget::Low);
        assert_eq!(request.assistant_personality, "formal");
        assert!(!request.use_pro_tools);
        assert!(!request.poll_for_completion);
    }

    #[test]
    fn test_blank_input_rejected_before_network() {
        let api = ScriptedApi::new();
        assert!(submit_command(&api, &Config::default(), options("   ")).is_err());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_blocking_submit_never_polls() {
        let api = ScriptedApi::new().with_submit(run("abc", RunStatus::Completed));
        submit_command(&api, &Config::default(), options("Find pricing")).unwrap();
        assert_eq!(api.count(|c| matches!(c, ApiCall::Submit(_))), 1);
        assert_eq!(api.count(|c| matches!(c, ApiCall::Status(_))), 0);
    }

    #[test]
    fn test_follow_run_polls_until_terminal() {
        let api = ScriptedApi::new().with_statuses(vec![
            run("abc", RunStatus::Running),
            run("abc", RunStatus::Running),
            run("abc", RunStatus::Completed),
        ]);
        let bar = ProgressBar::hidden();
        let outcome = follow_run(
            &api,
            run("abc", RunStatus::Starting),
            FAST,
            &SignalHandler::detached(),
            &bar,
        )
        .unwrap();

        assert_eq!(outcome, FollowOutcome::Finished(run("abc", RunStatus::Completed)));
        assert_eq!(api.count(|c| matches!(c, ApiCall::Status(_))), 3);
        assert_eq!(bar.position(), 100);
    }

    #[test]
    fn test_follow_run_progress_capped_while_running() {
        let mut statuses = vec![run("abc", RunStatus::Running); 12];
        statuses.push(run("abc", RunStatus::Failed));
        let api = ScriptedApi::new().with_statuses(statuses);
        let bar = ProgressBar::hidden();
        let outcome = follow_run(
            &api,
            run("abc", RunStatus::Starting),
            FAST,
            &SignalHandler::detached(),
            &bar,
        )
        .unwrap();
        assert!(matches!(outcome, FollowOutcome::Finished(r) if r.status == RunStatus::Failed));
        assert_eq!(api.count(|c| matches!(c, ApiCall::Status(_))), 13);
    }

    #[test]
    fn test_follow_run_stops_on_fetch_failure() {
        let api = ScriptedApi::new().with_statuses(vec![run("abc", RunStatus::Running)]);
        let result = follow_run(
            &api,
            run("abc", RunStatus::Starting),
            FAST,
            &SignalHandler::detached(),
            &ProgressBar::hidden(),
        );
        assert!(result.is_err());
        assert_eq!(api.count(|c| matches!(c, ApiCall::Status(_))), 2);
    }

    #[test]
    fn test_follow_run_interrupted_before_first_poll() {
        let api = ScriptedApi::new();
        let signal = SignalHandler::detached();
        signal.trigger();
        let outcome = follow_run(
            &api,
            run("abc", RunStatus::Starting),
            FAST,
            &signal,
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert_eq!(outcome, FollowOutcome::Interrupted(run("abc", RunStatus::Starting)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_follow_run_already_terminal() {
        let api = ScriptedApi::new();
        let outcome = follow_run(
            &api,
            run("abc", RunStatus::Completed),
            FAST,
            &SignalHandler::detached(),
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert!(matches!(outcome, FollowOutcome::Finished(_)));
        assert!(api.calls().is_empty());
    }
}
