//! Wire types exchanged with the orchestration API.
//!
//! All payloads use snake_case keys. The server is loose about which fields it
//! returns on each endpoint, so everything except `run_id` on [`Run`] is
//! optional or defaulted when deserializing.

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Personality text sent when the user has not written their own.
pub const DEFAULT_PERSONALITY: &str = "You are a helpful AI assistant with access to web data tools. Use them to provide accurate, up-to-date information.";

/// The assistant profiles the orchestration API knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assistant {
    #[default]
    WebResearcher,
    DataAnalyst,
    ContentCreator,
    TechnicalExpert,
}

impl Assistant {
    pub fn all() -> &'static [Assistant] {
        &[
            Assistant::WebResearcher,
            Assistant::DataAnalyst,
            Assistant::ContentCreator,
            Assistant::TechnicalExpert,
        ]
    }

    /// Identifier used on the wire and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Assistant::WebResearcher => "web_researcher",
            Assistant::DataAnalyst => "data_analyst",
            Assistant::ContentCreator => "content_creator",
            Assistant::TechnicalExpert => "technical_expert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assistant::WebResearcher => "Web Researcher",
            Assistant::DataAnalyst => "Data Analyst",
            Assistant::ContentCreator => "Content Creator",
            Assistant::TechnicalExpert => "Technical Expert",
        }
    }

    pub fn next(&self) -> Assistant {
        cycle(Self::all(), self, 1)
    }

    pub fn previous(&self) -> Assistant {
        cycle(Self::all(), self, Self::all().len() - 1)
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Coarse cost/effort tier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl Budget {
    pub fn all() -> &'static [Budget] {
        &[Budget::Low, Budget::Medium, Budget::High]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Low => "Low Budget",
            Budget::Medium => "Medium Budget",
            Budget::High => "High Budget",
        }
    }

    pub fn next(&self) -> Budget {
        cycle(Self::all(), self, 1)
    }

    pub fn previous(&self) -> Budget {
        cycle(Self::all(), self, Self::all().len() - 1)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Assistant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.key() == s)
            .ok_or_else(|| {
                format!(
                    "unknown assistant '{}' (expected one of: web_researcher, data_analyst, content_creator, technical_expert)",
                    s
                )
            })
    }
}

impl std::str::FromStr for Budget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|b| b.key() == s)
            .ok_or_else(|| format!("unknown budget '{}' (expected low, medium or high)", s))
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: &T, step: usize) -> T {
    let idx = all.iter().position(|v| v == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

/// Body of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub input: String,
    pub assistant_name: Assistant,
    pub assistant_personality: String,
    pub budget: Budget,
    pub use_pro_tools: bool,
    pub poll_for_completion: bool,
}

impl RunRequest {
    /// Create a request with the default configuration for the given task.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            assistant_name: Assistant::default(),
            assistant_personality: DEFAULT_PERSONALITY.to_string(),
            budget: Budget::default(),
            use_pro_tools: true,
            poll_for_completion: true,
        }
    }

    /// Reject requests the API would run with an empty task.
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(DashError::InvalidRequest(
                "the query or task must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lifecycle status of a run.
///
/// Statuses the client does not recognise are kept verbatim in `Other` and
/// rendered in a neutral style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Starting,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Starting => "starting",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }

    /// True while the API is still working on the run.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RunStatus::Starting | RunStatus::Running)
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Other(String::new())
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "starting" => RunStatus::Starting,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Other(s),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.as_str().is_empty() {
            write!(f, "unknown")
        } else {
            write!(f, "{}", self.as_str())
        }
    }
}

/// Echo of the request a run was created from.
///
/// Kept as plain strings so values written by other clients still display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default, deserialize_with = "lenient_input")]
    pub input: String,
    #[serde(default)]
    pub assistant_name: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub use_pro_tools: bool,
}

/// The API also accepts a conversation as input and echoes it back as a list
/// of `{role, content}` messages; those are flattened to their contents.
fn lenient_input<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(messages) => messages
            .iter()
            .filter_map(|m| m.get("content").and_then(|c| c.as_str()))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    })
}

/// A run as tracked by the orchestration API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub run_id: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub config: Option<RunConfig>,
}

impl Run {
    /// The originating query, if the server echoed one.
    pub fn query(&self) -> Option<&str> {
        self.config
            .as_ref()
            .map(|c| c.input.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn budget(&self) -> Option<&str> {
        self.config
            .as_ref()
            .map(|c| c.budget.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Body of `GET /runs`.
///
/// A missing or non-array `runs` field is treated as an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunList {
    #[serde(default)]
    pub total_runs: Option<usize>,
    #[serde(default, deserialize_with = "lenient_runs")]
    pub runs: Vec<Run>,
}

fn lenient_runs<'de, D>(deserializer: D) -> std::result::Result<Vec<Run>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub endpoints: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_request_new_uses_form_defaults() {
        let req = RunRequest::new("Research competitor pricing");
        assert_eq!(req.assistant_name, Assistant::WebResearcher);
        assert_eq!(req.budget, Budget::Medium);
        assert!(req.use_pro_tools);
        assert!(req.poll_for_completion);
        assert_eq!(req.assistant_personality, DEFAULT_PERSONALITY);
    }

    #[test]
    fn test_run_request_serializes_snake_case_keys() {
        let req = RunRequest::new("hello");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["input"], "hello");
        assert_eq!(value["assistant_name"], "web_researcher");
        assert_eq!(value["budget"], "medium");
        assert_eq!(value["use_pro_tools"], true);
        assert_eq!(value["poll_for_completion"], true);
        assert!(value["assistant_personality"].is_string());
    }

    #[test]
    fn test_run_request_validate_rejects_whitespace() {
        assert!(RunRequest::new("   \n\t").validate().is_err());
        assert!(RunRequest::new("").validate().is_err());
        assert!(RunRequest::new(" x ").validate().is_ok());
    }

    #[test]
    fn test_run_status_known_values() {
        let status: RunStatus = serde_json::from_value(json!("running")).unwrap();
        assert_eq!(status, RunStatus::Running);
        assert!(status.is_in_progress());
        assert!(!status.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
    }

    #[test]
    fn test_run_status_unknown_value_is_preserved() {
        let status: RunStatus = serde_json::from_value(json!("submitted")).unwrap();
        assert_eq!(status, RunStatus::Other("submitted".to_string()));
        assert_eq!(status.to_string(), "submitted");
        assert!(!status.is_terminal());
        assert!(!status.is_in_progress());
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("submitted"));
    }

    #[test]
    fn test_run_deserializes_minimal_submit_response() {
        let run: Run = serde_json::from_value(json!({"run_id": "abc", "status": "starting"})).unwrap();
        assert_eq!(run.run_id, "abc");
        assert_eq!(run.status, RunStatus::Starting);
        assert!(run.config.is_none());
        assert!(run.completed_at.is_none());
        assert_eq!(run.query(), None);
    }

    #[test]
    fn test_run_deserializes_full_response() {
        let run: Run = serde_json::from_value(json!({
            "run_id": "3f2a9c1e-0000-4000-8000-000000000000",
            "status": "completed",
            "result": "Pricing summary",
            "created_at": "2025-03-01T10:00:00.123456",
            "completed_at": "2025-03-01T10:02:00.000001",
            "config": {
                "input": "Research pricing",
                "assistant_name": "data_analyst",
                "assistant_personality": "ignored",
                "budget": "high",
                "use_pro_tools": false,
                "poll_for_completion": true,
                "extra_requirements": []
            }
        }))
        .unwrap();
        assert_eq!(run.query(), Some("Research pricing"));
        assert_eq!(run.budget(), Some("high"));
        assert_eq!(run.result.as_deref(), Some("Pricing summary"));
        assert!(!run.config.unwrap().use_pro_tools);
    }

    #[test]
    fn test_run_config_flattens_message_input() {
        let config: RunConfig = serde_json::from_value(json!({
            "input": [
                {"role": "user", "content": "first"},
                {"role": "user", "content": "second"}
            ],
            "budget": "low"
        }))
        .unwrap();
        assert_eq!(config.input, "first\nsecond");
        assert_eq!(config.budget, "low");
        assert_eq!(config.assistant_name, "");
    }

    #[test]
    fn test_run_list_tolerates_missing_and_malformed_runs() {
        let empty: RunList = serde_json::from_value(json!({})).unwrap();
        assert!(empty.runs.is_empty());

        let malformed: RunList = serde_json::from_value(json!({"runs": "nope"})).unwrap();
        assert!(malformed.runs.is_empty());

        let list: RunList = serde_json::from_value(json!({
            "total_runs": 1,
            "runs": [{"run_id": "r1", "status": "running", "created_at": "2025-03-01T10:00:00"}]
        }))
        .unwrap();
        assert_eq!(list.total_runs, Some(1));
        assert_eq!(list.runs.len(), 1);
        assert_eq!(list.runs[0].status, RunStatus::Running);
    }

    #[test]
    fn test_assistant_and_budget_cycle() {
        assert_eq!(Assistant::WebResearcher.next(), Assistant::DataAnalyst);
        assert_eq!(Assistant::TechnicalExpert.next(), Assistant::WebResearcher);
        assert_eq!(Assistant::WebResearcher.previous(), Assistant::TechnicalExpert);
        assert_eq!(Budget::High.next(), Budget::Low);
        assert_eq!(Budget::Low.previous(), Budget::High);
        assert_eq!(Budget::Medium.label(), "Medium Budget");
    }

    #[test]
    fn test_assistant_and_budget_parse_from_keys() {
        assert_eq!("data_analyst".parse::<Assistant>(), Ok(Assistant::DataAnalyst));
        assert_eq!("high".parse::<Budget>(), Ok(Budget::High));
        assert!("wizard".parse::<Assistant>().is_err());
        assert!("HIGH".parse::<Budget>().is_err());
    }
}
