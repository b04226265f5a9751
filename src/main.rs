//! maestro-dash CLI entry point.
//!
//! Parses command-line arguments, loads the configuration, and dispatches to
//! the appropriate command handler. Without a subcommand the dashboard runs.

use clap::{Parser, Subcommand};
use maestro_dash::api::{Assistant, Budget};
use maestro_dash::commands::{
    config_command, connect, dashboard_command, delete_command, ping_command, runs_command,
    status_command, submit_command, tools_command, SubmitOptions,
};
use maestro_dash::config::{load_config, validate_config, Config};
use maestro_dash::error::Result;
use maestro_dash::logging::init_stderr_logging;
use maestro_dash::output::print_error;

#[derive(Parser)]
#[command(name = "maestro-dash")]
#[command(
    version,
    about = "Terminal dashboard and CLI for an AI agent orchestration API",
    after_help = "EXAMPLES:
    # Open the dashboard against the configured API
    maestro-dash
    maestro-dash --api-url http://10.0.0.5:8000

    # Run an agent and wait for the result
    maestro-dash submit \"Compare pricing of the top three CRM tools\"

    # Run in the background and follow progress (Ctrl+C stops following)
    maestro-dash submit --background --budget high \"Summarize this week's AI news\"

    # Inspect history
    maestro-dash runs
    maestro-dash status 3f2a9c1e-7b4d-4e8a-9c3b-2d1f0e9a8b7c"
)]
struct Cli {
    /// Base address of the orchestration API (overrides MAESTRO_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Log debug output to stderr for headless commands
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal dashboard (default)
    #[command(after_help = "KEYS:
    Tab/Shift+Tab     switch between AI Agent, Run History and Available Tools
    Ctrl+C            quit from anywhere

    AI Agent:     Up/Down field, type to edit, Left/Right/Space change option, Enter run
    Run History:  Up/Down select, Enter details, R refresh, D delete, Q quit
    Details:      Up/Down/PgUp/PgDn scroll, Esc/Enter/Q close

LOGS:
    Written to ~/.config/maestro-dash/dashboard.log (RUST_LOG overrides the level).")]
    Dashboard,

    /// Submit a run to an agent
    Submit {
        /// The query or task for the agent
        input: String,

        /// Assistant profile: web_researcher, data_analyst, content_creator, technical_expert
        #[arg(short, long)]
        assistant: Option<Assistant>,

        /// Budget level: low, medium, high
        #[arg(short, long)]
        budget: Option<Budget>,

        /// Behaviour instructions for the assistant
        #[arg(short, long)]
        personality: Option<String>,

        /// Restrict the agent to the free tool tier
        #[arg(long)]
        no_pro_tools: bool,

        /// Return immediately and poll for status instead of waiting on the request
        #[arg(long)]
        background: bool,
    },

    /// List runs known to the API
    Runs,

    /// Show a single run, including its result
    Status {
        /// Full run id
        run_id: String,
    },

    /// Delete a run from the API's history
    Delete {
        /// Full run id
        run_id: String,
    },

    /// List the tools available to agents
    Tools,

    /// Show the effective configuration
    Config,

    /// Check that the API is reachable
    Ping,
}

fn main() {
    let cli = Cli::parse();

    let config = match effective_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Dashboard);
    if !matches!(command, Commands::Dashboard) {
        init_stderr_logging(cli.verbose);
    }

    if let Err(e) = run_command(command, &config) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load the config file and apply the environment and flag overrides.
fn effective_config(cli_api_url: Option<&str>) -> Result<Config> {
    let config = load_config()?.with_api_url_override(cli_api_url);
    validate_config(&config)?;
    Ok(config)
}

fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dashboard => dashboard_command(config),
        Commands::Submit {
            input,
            assistant,
            budget,
            personality,
            no_pro_tools,
            background,
        } => {
            let options = SubmitOptions {
                input,
                assistant,
                budget,
                personality,
                no_pro_tools,
                background,
            };
            submit_command(&connect(config)?, config, options)
        }
        Commands::Runs => runs_command(&connect(config)?),
        Commands::Status { run_id } => status_command(&connect(config)?, &run_id),
        Commands::Delete { run_id } => delete_command(&connect(config)?, &run_id),
        Commands::Tools => {
            tools_command();
            Ok(())
        }
        Commands::Config => config_command(config),
        Commands::Ping => ping_command(&connect(config)?, &config.api_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_dashboard() {
        let cli = Cli::try_parse_from(["maestro-dash"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn test_api_url_is_global() {
        let cli = Cli::try_parse_from(["maestro-dash", "runs", "--api-url", "http://h:1"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Some(Commands::Runs)));
    }

    #[test]
    fn test_submit_parses_options() {
        let cli = Cli::try_parse_from([
            "maestro-dash",
            "submit",
            "--assistant",
            "data_analyst",
            "--budget",
            "high",
            "--background",
            "--no-pro-tools",
            "Find pricing",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Submit {
                input,
                assistant,
                budget,
                personality,
                no_pro_tools,
                background,
            }) => {
                assert_eq!(input, "Find pricing");
                assert_eq!(assistant, Some(Assistant::DataAnalyst));
                assert_eq!(budget, Some(Budget::High));
                assert!(personality.is_none());
                assert!(no_pro_tools);
                assert!(background);
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_submit_rejects_unknown_budget() {
        assert!(Cli::try_parse_from(["maestro-dash", "submit", "--budget", "huge", "q"]).is_err());
    }

    #[test]
    fn test_status_requires_run_id() {
        assert!(Cli::try_parse_from(["maestro-dash", "status"]).is_err());
        let cli = Cli::try_parse_from(["maestro-dash", "status", "abc"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { run_id }) if run_id == "abc"));
    }
}
