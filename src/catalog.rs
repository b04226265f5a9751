//! Static catalog of the web-data tools available to agents.

/// Pricing tier of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTier {
    /// Free "rapid" tools, always available.
    Rapid,
    /// Paid tools, enabled by `use_pro_tools`.
    Pro,
}

impl ToolTier {
    pub fn title(&self) -> &'static str {
        match self {
            ToolTier::Rapid => "Rapid Tools (Free)",
            ToolTier::Pro => "Pro Tools",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            ToolTier::Rapid => "FREE",
            ToolTier::Pro => "PRO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub tier: ToolTier,
    pub name: &'static str,
    pub description: &'static str,
}

pub const TOOLS: &[Tool] = &[
    Tool {
        tier: ToolTier::Rapid,
        name: "Search Engine",
        description: "Scrape search results from Google, Bing or Yandex",
    },
    Tool {
        tier: ToolTier::Rapid,
        name: "Web Scraper",
        description: "Scrape any webpage as clean markdown",
    },
    Tool {
        tier: ToolTier::Pro,
        name: "E-commerce Data",
        description: "Amazon, Walmart, eBay, and more",
    },
    Tool {
        tier: ToolTier::Pro,
        name: "Social Media",
        description: "LinkedIn, Instagram, Twitter, TikTok",
    },
    Tool {
        tier: ToolTier::Pro,
        name: "Business Intelligence",
        description: "ZoomInfo, Crunchbase, job listings",
    },
    Tool {
        tier: ToolTier::Pro,
        name: "Browser Automation",
        description: "Navigate, click, type, screenshot",
    },
];

pub fn tools_in(tier: ToolTier) -> impl Iterator<Item = &'static Tool> {
    TOOLS.iter().filter(move |t| t.tier == tier)
}
