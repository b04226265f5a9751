//! Tracing subscriber setup.
//!
//! The dashboard owns the terminal, so it logs to a file in the config
//! directory. Headless commands log to stderr.

use crate::config::ensure_config_dir;
use crate::error::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILENAME: &str = "dashboard.log";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Send logs to `~/.config/maestro-dash/dashboard.log`, returning its path.
pub fn init_file_logging() -> Result<PathBuf> {
    let path = ensure_config_dir()?.join(LOG_FILENAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // A second init (e.g. from tests) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("maestro_dash=info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}

/// Send logs to stderr; `verbose` lowers the default level to debug.
pub fn init_stderr_logging(verbose: bool) {
    let default = if verbose {
        "maestro_dash=debug"
    } else {
        "maestro_dash=warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
