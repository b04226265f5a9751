//! Tools command handler.

use crate::output::print_tools;

/// Print the catalog of tools available to agents.
pub fn tools_command() {
    print_tools();
}
