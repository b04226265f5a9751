//! Config command handler.
//!
//! Displays the effective configuration after environment and flag overrides.

use crate::config::{config_path, Config};
use crate::error::{DashError, Result};
use crate::output::{BOLD, CYAN, GRAY, RESET};

/// Display the effective configuration and the file it was read from.
pub fn config_command(config: &Config) -> Result<()> {
    println!("{BOLD}# Effective config{RESET}");
    println!("{GRAY}# {}{RESET}", config_path()?.display());
    println!();

    for line in config_to_toml_string(config)?.lines() {
        match line.split_once(" = ") {
            Some((key, value)) => println!("{CYAN}{}{RESET} = {}", key, value),
            None => println!("{}", line),
        }
    }
    Ok(())
}

/// Serialize a Config to TOML.
pub fn config_to_toml_string(config: &Config) -> Result<String> {
    toml::to_string(config).map_err(|e| DashError::Config(format!("Failed to serialize config: {}", e)))
}
