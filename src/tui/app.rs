//! Dashboard TUI application.
//!
//! The main application struct, keyboard handling and event loop.

use super::ui;
use super::views::Tab;
use crate::api::OrchestratorApi;
use crate::config::Config;
use crate::dashboard::{AgentForm, ApiEvent, Dashboard, Effect, Worker};
use crate::error::{DashError, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input before checking timers.
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Lines scrolled by PageUp/PageDown in the details popup.
const PAGE_SCROLL: u16 = 10;

/// The dashboard application state.
#[derive(Debug)]
pub struct DashboardApp {
    pub dashboard: Dashboard,
    /// Current tab being displayed
    current_tab: Tab,
    /// Highlighted row in the run history
    selected_index: usize,
    /// Scroll offset of the details popup
    detail_scroll: u16,
    /// Base address shown in the header
    api_url: String,
    /// Whether API failures are shown in the footer
    show_errors: bool,
    should_quit: bool,
}

impl DashboardApp {
    pub fn new(config: &Config) -> Self {
        Self {
            dashboard: Dashboard::new(AgentForm::from_config(config), config.poll_interval()),
            current_tab: Tab::default(),
            selected_index: 0,
            detail_scroll: 0,
            api_url: config.api_url.clone(),
            show_errors: config.show_errors,
            should_quit: false,
        }
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Error to show in the footer, if enabled.
    pub fn visible_error(&self) -> Option<&str> {
        if self.show_errors {
            self.dashboard.last_error()
        } else {
            None
        }
    }

    pub fn is_showing_details(&self) -> bool {
        self.dashboard.selected_run().is_some()
    }

    /// Keep the history selection inside the list after it was replaced.
    pub fn clamp_selection(&mut self) {
        let len = self.dashboard.runs().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Handle a key press, returning the API calls it triggers.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }

        if self.is_showing_details() {
            self.handle_details_key(key.code);
            return Vec::new();
        }

        match key.code {
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.previous();
                return Vec::new();
            }
            _ => {}
        }

        match self.current_tab {
            Tab::Agent => self.handle_agent_key(key.code),
            Tab::History => self.handle_history_key(key.code),
            Tab::Tools => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.should_quit = true;
                }
                Vec::new()
            }
        }
    }

    fn handle_agent_key(&mut self, code: KeyCode) -> Vec<Effect> {
        if code == KeyCode::Enter {
            return self.dashboard.submit().into_iter().collect();
        }

        let form = &mut self.dashboard.form;
        let text_field = form.focused().is_text();
        match code {
            KeyCode::Up => form.focus_previous(),
            KeyCode::Down => form.focus_next(),
            KeyCode::Left => form.previous_option(),
            KeyCode::Right => form.next_option(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(' ') if !text_field => form.next_option(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
        Vec::new()
    }

    fn handle_history_key(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Down => {
                let max_index = self.dashboard.runs().len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
            }
            KeyCode::Enter => {
                if self.dashboard.open_details(self.selected_index) {
                    self.detail_scroll = 0;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return vec![self.dashboard.refresh()],
            KeyCode::Char('d') | KeyCode::Char('D') => {
                return self.dashboard.delete(self.selected_index).into_iter().collect();
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_details_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.dashboard.close_details();
                self.detail_scroll = 0;
            }
            KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            KeyCode::Down => self.scroll_details_down(1),
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(PAGE_SCROLL);
            }
            KeyCode::PageDown => self.scroll_details_down(PAGE_SCROLL),
            _ => {}
        }
    }

    /// Scroll down, keeping at least the last line of the details in view.
    fn scroll_details_down(&mut self, by: u16) {
        let max = self
            .dashboard
            .selected_run()
            .map_or(0, |run| ui::detail_lines(run).len().saturating_sub(1));
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.saturating_add(by).min(max);
    }

    /// Apply arrived API outcomes and advance timers, returning follow-up calls.
    pub fn update(&mut self, events: Vec<ApiEvent>, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            effects.extend(self.dashboard.apply(event, now));
        }
        self.clamp_selection();
        effects.extend(self.dashboard.tick(now));
        effects
    }
}

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard until the user quits.
///
/// Initializes the terminal, runs the event loop, and restores the terminal
/// on exit. The status poller is cancelled before returning.
pub fn run_dashboard(config: &Config, api: Arc<dyn OrchestratorApi>) -> Result<()> {
    // Restore the terminal if anything panics while it is in raw mode
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = init_terminal().map_err(|e| DashError::Terminal(e.to_string()))?;

    let mut app = DashboardApp::new(config);
    let worker = Worker::new(api);
    worker.dispatch_all(app.dashboard.start());
    tracing::info!(api_url = %config.api_url, "dashboard started");

    let result = event_loop(&mut terminal, &mut app, &worker);

    app.dashboard.shutdown();
    restore_terminal(&mut terminal).map_err(|e| DashError::Terminal(e.to_string()))?;
    tracing::info!("dashboard closed");

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut DashboardApp,
    worker: &Worker,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(EVENT_POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release or repeat)
                if key.kind == KeyEventKind::Press {
                    worker.dispatch_all(app.handle_key(key));
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        worker.dispatch_all(app.update(worker.drain(), Instant::now()));
    }
}
