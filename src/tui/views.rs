//! Tab definitions for the dashboard.
//!
//! The dashboard has three tabs:
//! - AI Agent: configure and submit a run, follow the current run
//! - Run History: runs known to the API, with a details popup
//! - Available Tools: static tool catalog

use std::fmt;

/// The tabs of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Agent,
    History,
    Tools,
}

impl Tab {
    /// Returns the display name for this tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Agent => "AI Agent",
            Tab::History => "Run History",
            Tab::Tools => "Available Tools",
        }
    }

    /// Get all tabs in order.
    pub fn all() -> &'static [Tab] {
        &[Tab::Agent, Tab::History, Tab::Tools]
    }

    /// Position of this tab in [`Tab::all`].
    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    /// Get the next tab in the cycle.
    pub fn next(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + 1) % tabs.len()]
    }

    /// Get the previous tab in the cycle.
    pub fn previous(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + tabs.len() - 1) % tabs.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
