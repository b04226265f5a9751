//! Basic message output functions.

use super::colors::*;

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

pub fn print_success(msg: &str) {
    println!("{GREEN}{BOLD}Done:{RESET} {}", msg);
}

/// Print the notice shown when Ctrl+C stops following a background run.
pub fn print_interrupted(run_id: &str) {
    println!();
    println!(
        "{YELLOW}Stopped following run.{RESET} It keeps running; check it with '{CYAN}maestro-dash status {}{RESET}'.",
        run_id
    );
}
