//! Terminal output formatting for the headless commands.
//!
//! - [`messages`] - Error, info, and success messages
//! - [`runs`] - Run tables, run details, and service info
//! - [`tools`] - The tool catalog

pub mod messages;
pub mod runs;
pub mod tools;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

pub use messages::{print_error, print_info, print_interrupted, print_success};
pub use runs::{format_status, print_run_detail, print_runs_table, print_service_info};
pub use tools::print_tools;
