//! Editable state of the agent configuration form.

use crate::api::RunRequest;
use crate::config::Config;

/// Fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Input,
    Assistant,
    Budget,
    UseProTools,
    PollForCompletion,
    Personality,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Input,
            FormField::Assistant,
            FormField::Budget,
            FormField::UseProTools,
            FormField::PollForCompletion,
            FormField::Personality,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Input => "Your Query or Task",
            FormField::Assistant => "Assistant Type",
            FormField::Budget => "Budget Level",
            FormField::UseProTools => "Use Pro Tools (Advanced web scraping capabilities)",
            FormField::PollForCompletion => "Wait for completion (vs. run in background)",
            FormField::Personality => "Assistant Personality",
        }
    }

    /// Whether the field accepts typed text.
    pub fn is_text(&self) -> bool {
        matches!(self, FormField::Input | FormField::Personality)
    }
}

/// The agent configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentForm {
    pub request: RunRequest,
    focused: FormField,
}

impl Default for AgentForm {
    fn default() -> Self {
        Self {
            request: RunRequest::new(""),
            focused: FormField::Input,
        }
    }
}

impl AgentForm {
    /// A blank form preloaded with the configured defaults.
    pub fn from_config(config: &Config) -> Self {
        let mut form = Self::default();
        form.request.assistant_name = config.assistant_name;
        form.request.budget = config.budget;
        form.request.use_pro_tools = config.use_pro_tools;
        form.request.poll_for_completion = config.poll_for_completion;
        form.request.assistant_personality = config.assistant_personality.clone();
        form
    }

    pub fn focused(&self) -> FormField {
        self.focused
    }

    /// True when the query has something other than whitespace.
    pub fn has_input(&self) -> bool {
        !self.request.input.trim().is_empty()
    }

    pub fn focus_next(&mut self) {
        let all = FormField::all();
        let idx = all.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = all[(idx + 1) % all.len()];
    }

    pub fn focus_previous(&mut self) {
        let all = FormField::all();
        let idx = all.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = all[(idx + all.len() - 1) % all.len()];
    }

    pub fn push_char(&mut self, c: char) {
        match self.focused {
            FormField::Input => self.request.input.push(c),
            FormField::Personality => self.request.assistant_personality.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            FormField::Input => {
                self.request.input.pop();
            }
            FormField::Personality => {
                self.request.assistant_personality.pop();
            }
            _ => {}
        }
    }

    /// Cycle or toggle the focused field forwards.
    pub fn next_option(&mut self) {
        match self.focused {
            FormField::Assistant => {
                self.request.assistant_name = self.request.assistant_name.next();
            }
            FormField::Budget => self.request.budget = self.request.budget.next(),
            FormField::UseProTools => self.request.use_pro_tools = !self.request.use_pro_tools,
            FormField::PollForCompletion => {
                self.request.poll_for_completion = !self.request.poll_for_completion;
            }
            FormField::Input | FormField::Personality => {}
        }
    }

    /// Cycle or toggle the focused field backwards.
    pub fn previous_option(&mut self) {
        match self.focused {
            FormField::Assistant => {
                self.request.assistant_name = self.request.assistant_name.previous();
            }
            FormField::Budget => self.request.budget = self.request.budget.previous(),
            FormField::UseProTools | FormField::PollForCompletion => self.next_option(),
            FormField::Input | FormField::Personality => {}
        }
    }
}
