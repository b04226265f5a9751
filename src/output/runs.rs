//! Run display.
//!
//! Output functions for the run list, a single run, and the service banner.

use crate::api::{Run, RunStatus, ServiceInfo};
use crate::display::{
    budget_or_unknown, format_timestamp, query_or_placeholder, short_run_id, truncate, yes_no,
    StatusTone,
};

use super::colors::*;

const QUERY_WIDTH: usize = 40;

/// Status text wrapped in the color of its tone.
pub fn format_status(status: &RunStatus) -> String {
    let color = match StatusTone::of(status) {
        StatusTone::Success => GREEN,
        StatusTone::Danger => RED,
        StatusTone::Warning => YELLOW,
        StatusTone::Neutral => BLUE,
    };
    format!("{color}{}{RESET}", status)
}

/// One table line per run, without colors.
pub fn format_run_rows(runs: &[Run]) -> Vec<String> {
    runs.iter()
        .map(|run| {
            format!(
                "{:<12} {:<width$} {:<10} {:<8} {}",
                short_run_id(&run.run_id),
                truncate(query_or_placeholder(run), QUERY_WIDTH),
                run.status.to_string(),
                budget_or_unknown(run),
                format_timestamp(&run.created_at),
                width = QUERY_WIDTH
            )
        })
        .collect()
}

/// Print the run history table.
pub fn print_runs_table(runs: &[Run]) {
    if runs.is_empty() {
        println!("{GRAY}No runs yet.{RESET}");
        return;
    }

    println!(
        "{BOLD}{:<12} {:<width$} {:<10} {:<8} {}{RESET}",
        "RUN ID",
        "QUERY",
        "STATUS",
        "BUDGET",
        "CREATED",
        width = QUERY_WIDTH
    );
    for row in format_run_rows(runs) {
        println!("{}", row);
    }
    println!();
    println!(
        "{GRAY}{} run{}{RESET}",
        runs.len(),
        if runs.len() == 1 { "" } else { "s" }
    );
}

/// Print every field of a run.
pub fn print_run_detail(run: &Run) {
    println!("{BLUE}Run ID:{RESET}     {}", run.run_id);
    println!("{BLUE}Status:{RESET}     {}", format_status(&run.status));
    println!("{BLUE}Created:{RESET}    {}", format_timestamp(&run.created_at));
    if let Some(completed) = run.completed_at.as_deref() {
        println!("{BLUE}Completed:{RESET}  {}", format_timestamp(completed));
    }

    if let Some(config) = &run.config {
        println!();
        println!("{BOLD}Query{RESET}");
        println!("{}", query_or_placeholder(run));
        println!();
        println!("{BOLD}Configuration{RESET}");
        println!("{BLUE}Assistant:{RESET}  {}", config.assistant_name);
        println!("{BLUE}Budget:{RESET}     {}", budget_or_unknown(run));
        println!("{BLUE}Pro Tools:{RESET}  {}", yes_no(config.use_pro_tools));
    }

    if let Some(result) = run.result.as_deref().filter(|r| !r.is_empty()) {
        println!();
        println!("{BOLD}Result{RESET}");
        println!("{}", result);
    }
}

/// Print the root endpoint's service description.
pub fn print_service_info(api_url: &str, info: &ServiceInfo) {
    println!("{GREEN}{BOLD}Connected{RESET} to {CYAN}{}{RESET}", api_url);
    if !info.message.is_empty() {
        println!("{}", info.message);
    }
    if !info.version.is_empty() {
        println!("{BLUE}Version:{RESET} {}", info.version);
    }
    if !info.endpoints.is_empty() {
        println!();
        println!("{BOLD}Endpoints{RESET}");
        for (name, path) in &info.endpoints {
            println!("  {:<12} {GRAY}{}{RESET}", name, path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{run, run_with_config};

    #[test]
    fn test_format_status_colors_by_tone() {
        assert_eq!(
            format_status(&RunStatus::Completed),
            format!("{GREEN}completed{RESET}")
        );
        assert_eq!(
            format_status(&RunStatus::Failed),
            format!("{RED}failed{RESET}")
        );
        assert_eq!(
            format_status(&RunStatus::Other(String::new())),
            format!("{BLUE}unknown{RESET}")
        );
    }

    #[test]
    fn test_format_run_rows() {
        let rows = format_run_rows(&[
            run_with_config("3f2a9c1e-7b4d-4e8a", RunStatus::Completed, "Find pricing"),
            run("0b1c2d3e4f", RunStatus::Running),
        ]);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("3f2a9c1e... "));
        assert!(rows[0].contains("Find pricing"));
        assert!(rows[0].contains("medium"));
        assert!(rows[0].ends_with("2025-03-01 10:00:00"));
        assert!(rows[1].contains("No query available"));
        assert!(rows[1].contains("unknown"));
    }

    #[test]
    fn test_print_functions_smoke() {
        print_runs_table(&[]);
        print_runs_table(&[run("r1", RunStatus::Running)]);
        let mut full = run_with_config("r2", RunStatus::Completed, "q");
        full.result = Some("done".to_string());
        full.completed_at = Some("2025-03-01T10:05:00".to_string());
        print_run_detail(&full);
        print_service_info("http://localhost:8000", &ServiceInfo::default());
    }
}
