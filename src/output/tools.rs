//! Tool catalog display.

use crate::catalog::{tools_in, ToolTier};

use super::colors::*;

/// Print both tiers of the tool catalog.
pub fn print_tools() {
    for (i, tier) in [ToolTier::Rapid, ToolTier::Pro].into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let badge_color = match tier {
            ToolTier::Rapid => GREEN,
            ToolTier::Pro => CYAN,
        };
        println!("{BOLD}{}{RESET}", tier.title());
        for tool in tools_in(tier) {
            println!(
                "  {BOLD}{:<22}{RESET} {badge_color}[{}]{RESET} {GRAY}{}{RESET}",
                tool.name,
                tier.badge(),
                tool.description
            );
        }
    }
}
