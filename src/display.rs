//! Formatting helpers shared by the dashboard and the CLI output.

use crate::api::{Run, RunStatus};
use chrono::{DateTime, Local, NaiveDateTime};

/// Characters of the run id shown in history rows.
pub const SHORT_ID_LEN: usize = 8;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for runs the API returned without their query.
pub const NO_QUERY: &str = "No query available";

/// Shorten a run id to its first 8 characters followed by "...".
pub fn short_run_id(run_id: &str) -> String {
    let prefix: String = run_id.chars().take(SHORT_ID_LEN).collect();
    format!("{}...", prefix)
}

/// Render an API timestamp in local time.
///
/// RFC 3339 timestamps are converted to the local zone; naive timestamps
/// (the API's default) are already local and are shown as-is. Anything
/// unparseable is returned verbatim.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}

/// Text shown in place of a run's result before (or without) one arriving.
pub fn result_placeholder(status: &RunStatus) -> &'static str {
    if status.is_in_progress() {
        "Waiting for result..."
    } else {
        "No result returned"
    }
}

pub fn query_or_placeholder(run: &Run) -> &str {
    run.query().unwrap_or(NO_QUERY)
}

pub fn budget_or_unknown(run: &Run) -> &str {
    run.budget().unwrap_or("unknown")
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Semantic colour class of a status, mapped to concrete colours by each
/// front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Danger,
    Warning,
    Neutral,
}

impl StatusTone {
    pub fn of(status: &RunStatus) -> Self {
        match status {
            RunStatus::Completed => StatusTone::Success,
            RunStatus::Failed => StatusTone::Danger,
            RunStatus::Running => StatusTone::Warning,
            RunStatus::Starting | RunStatus::Other(_) => StatusTone::Neutral,
        }
    }
}

/// Truncate a string to at most `max_chars` characters, adding "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
