use crate::api::{Assistant, Budget, DEFAULT_PERSONALITY};
use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "maestro-dash";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides `api_url` from the config file.
pub const API_URL_ENV: &str = "MAESTRO_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Configuration
// ============================================================================

/// Settings for the dashboard and the headless commands.
///
/// Missing fields in the config file fall back to their defaults, so a
/// partial file is valid.
///
/// # Example
///
/// ```toml
/// api_url = "http://localhost:8000"
/// poll_interval_ms = 2000
/// budget = "high"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the orchestration API.
    pub api_url: String,

    /// Interval between status checks for a run submitted in the background.
    pub poll_interval_ms: u64,

    /// Upper bound for a single HTTP request. Blocking submissions wait for
    /// the whole run, so this is generous by default.
    pub request_timeout_secs: u64,

    /// Assistant preselected in the form.
    pub assistant_name: Assistant,

    /// Budget preselected in the form.
    pub budget: Budget,

    /// Whether the pro tool tier is enabled by default.
    pub use_pro_tools: bool,

    /// Whether submissions wait for completion by default.
    pub poll_for_completion: bool,

    /// Behaviour instructions sent with every run.
    pub assistant_personality: String,

    /// Show the last API failure in the dashboard footer.
    /// Failures are always written to the log.
    pub show_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            assistant_name: Assistant::default(),
            budget: Budget::default(),
            use_pro_tools: true,
            poll_for_completion: true,
            assistant_personality: DEFAULT_PERSONALITY.to_string(),
            show_errors: false,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Apply overrides in precedence order: explicit value, then the
    /// `MAESTRO_API_URL` environment variable, then the file.
    pub fn with_api_url_override(mut self, cli_value: Option<&str>) -> Self {
        self.apply_api_url_override(cli_value, env::var(API_URL_ENV).ok().as_deref());
        self
    }

    fn apply_api_url_override(&mut self, cli_value: Option<&str>, env_value: Option<&str>) {
        if let Some(url) = cli_value.or(env_value).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
    }
}

// ============================================================================
// Config Validation
// ============================================================================

/// Check that the configuration can drive the dashboard.
///
/// - `api_url` must be an absolute http(s) URL
/// - `poll_interval_ms` and `request_timeout_secs` must be non-zero
pub fn validate_config(config: &Config) -> Result<()> {
    let url = url::Url::parse(config.api_url.trim())
        .map_err(|e| DashError::Config(format!("Invalid api_url '{}': {}", config.api_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DashError::Config(format!(
            "api_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.poll_interval_ms == 0 {
        return Err(DashError::Config(
            "poll_interval_ms must be greater than zero".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(DashError::Config(
            "request_timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Config File Management
// ============================================================================

/// Default config file content with explanatory comments.
const DEFAULT_CONFIG_WITH_COMMENTS: &str = r#"# maestro-dash configuration

# Base address of the orchestration API.
# Overridden by the MAESTRO_API_URL environment variable and --api-url.
api_url = "http://localhost:8000"

# Milliseconds between status checks for runs submitted in the background.
poll_interval_ms = 2000

# Upper bound in seconds for a single request. Submissions that wait for
# completion keep the request open for the whole run.
request_timeout_secs = 300

# Form defaults.
# assistant_name: web_researcher | data_analyst | content_creator | technical_expert
assistant_name = "web_researcher"
# budget: low | medium | high
budget = "medium"
use_pro_tools = true
poll_for_completion = true
assistant_personality = "You are a helpful AI assistant with access to web data tools. Use them to provide accurate, up-to-date information."

# Show the last API failure in the dashboard footer (failures are always logged).
show_errors = false
"#;

/// Get the config directory path (~/.config/maestro-dash/).
///
/// Does not create the directory.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DashError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Ensure the config directory exists, returning its path.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the path to the config file (~/.config/maestro-dash/config.toml).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration from `~/.config/maestro-dash/config.toml`.
///
/// Creates the file with commented defaults if it doesn't exist.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from an explicit path, creating it with defaults if
/// it doesn't exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_WITH_COMMENTS)?;
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        DashError::Config(format!("Failed to parse config file at {:?}: {}", path, e))
    })?;
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
        assert_eq!(config.assistant_name, Assistant::WebResearcher);
        assert_eq!(config.budget, Budget::Medium);
        assert!(config.use_pro_tools);
        assert!(config.poll_for_completion);
        assert!(!config.show_errors);
    }

    #[test]
    fn test_default_config_file_matches_default_struct() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_WITH_COMMENTS).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_creates_file_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("poll_interval_ms = 2000"));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "budget = \"high\"\nshow_errors = true\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.budget, Budget::High);
        assert!(config.show_errors);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "budget = [").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_rejects_unknown_budget() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "budget = \"unlimited\"\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            poll_interval_ms: 0,
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            api_url: "localhost:8000/api".to_string(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            api_url: "ws://localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_api_url_override_precedence() {
        let mut config = Config::default();
        config.apply_api_url_override(None, Some("http://env:9000"));
        assert_eq!(config.api_url, "http://env:9000");

        config.apply_api_url_override(Some("http://cli:7000"), Some("http://env:9000"));
        assert_eq!(config.api_url, "http://cli:7000");

        config.apply_api_url_override(None, Some("   "));
        assert_eq!(config.api_url, "http://cli:7000");
    }
}
