//! Dashboard rendering.
//!
//! Layout (top to bottom):
//! - Header: tab bar with the API address in its title
//! - Content: the selected tab
//! - Footer: key help, and the last API error when enabled
//!
//! The run details view is drawn as a popup over the history tab.

use super::app::DashboardApp;
use super::views::Tab;
use crate::api::Run;
use crate::catalog::{tools_in, ToolTier};
use crate::dashboard::{AgentForm, FormField};
use crate::display::{
    budget_or_unknown, format_timestamp, query_or_placeholder, result_placeholder, short_run_id,
    truncate, yes_no, StatusTone,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Tabs, Wrap,
    },
    Frame,
};

/// Width of the query column in the history table.
const QUERY_COLUMN_WIDTH: usize = 48;

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.current_tab() {
        Tab::Agent => render_agent_tab(frame, chunks[1], app),
        Tab::History => render_history_tab(frame, chunks[1], app),
        Tab::Tools => render_tools_tab(frame, chunks[1]),
    }
    render_footer(frame, chunks[2], app);

    if let Some(run) = app.dashboard.selected_run() {
        render_run_details(frame, run, app.detail_scroll());
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let titles: Vec<Line> = Tab::all().iter().map(|t| Line::from(t.name())).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" maestro dashboard | {} ", app.api_url())),
        )
        .select(app.current_tab().index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

// ============================================================================
// AI Agent tab
// ============================================================================

fn render_agent_tab(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_agent_form(frame, chunks[0], app);
    render_current_run(frame, chunks[1], app);
}

/// Display value of a form field.
pub fn field_value(form: &AgentForm, field: FormField) -> String {
    let request = &form.request;
    match field {
        FormField::Input => request.input.clone(),
        FormField::Assistant => format!("< {} >", request.assistant_name.label()),
        FormField::Budget => format!("< {} >", request.budget.label()),
        FormField::UseProTools => checkbox(request.use_pro_tools).to_string(),
        FormField::PollForCompletion => checkbox(request.poll_for_completion).to_string(),
        FormField::Personality => request.assistant_personality.clone(),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_agent_form(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let form = &app.dashboard.form;
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::all() {
        let focused = form.focused() == *field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(field.label(), label_style),
        ]));

        let mut value = field_value(form, *field);
        if focused && field.is_text() {
            value.push('_');
        }
        lines.push(Line::from(Span::styled(
            format!("    {}", value),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));
    }

    let (submit_label, submit_style) = if app.dashboard.is_loading() {
        ("Running Agent...", Style::default().fg(Color::Yellow))
    } else if app.dashboard.can_submit() {
        (
            "Run AI Agent",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Run AI Agent", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        Span::styled("  [ ", submit_style),
        Span::styled(submit_label, submit_style),
        Span::styled(" ]", submit_style),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Agent Configuration "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_current_run(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Current Run ");

    let Some(run) = app.dashboard.current_run() else {
        let message = if app.dashboard.is_loading() {
            "Submitting run..."
        } else {
            "No run submitted yet"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Id and status
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Result
        ])
        .split(inner);

    let header = vec![
        Line::from(vec![
            Span::styled("Run ID: ", Style::default().fg(Color::DarkGray)),
            Span::styled(run.run_id.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                run.status.to_string(),
                Style::default()
                    .fg(status_color(run))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let progress = app.dashboard.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(
            Style::default()
                .fg(Color::Green)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .ratio(progress.as_ratio())
        .label(Span::styled(
            format!("{}%", progress.percent()),
            Style::default().fg(Color::White),
        ));
    frame.render_widget(gauge, chunks[1]);

    let result = match run.result.as_deref() {
        Some(text) if !text.is_empty() => Paragraph::new(text.to_string())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false }),
        _ => Paragraph::new(result_placeholder(&run.status))
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(result, chunks[3]);
}

// ============================================================================
// Run History tab
// ============================================================================

fn render_history_tab(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let runs = app.dashboard.runs();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Run History ({}) ", runs.len()));

    if runs.is_empty() {
        let message = Paragraph::new("No runs yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(["RUN ID", "QUERY", "STATUS", "BUDGET", "CREATED"])
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let rows: Vec<Row> = runs.iter().map(history_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(19),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_index()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn history_row(run: &Run) -> Row<'static> {
    Row::new(vec![
        Cell::from(short_run_id(&run.run_id)).style(Style::default().fg(Color::Cyan)),
        Cell::from(truncate(query_or_placeholder(run), QUERY_COLUMN_WIDTH)),
        Cell::from(run.status.to_string()).style(Style::default().fg(status_color(run))),
        Cell::from(budget_or_unknown(run).to_string()),
        Cell::from(format_timestamp(&run.created_at)).style(Style::default().fg(Color::DarkGray)),
    ])
}

/// Lines of the run details popup.
pub fn detail_lines(run: &Run) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Run ID: ", label),
            Span::styled(run.run_id.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(run.status.to_string(), Style::default().fg(status_color(run))),
        ]),
        Line::from(""),
        Line::from(Span::styled("Query", heading)),
    ];
    lines.extend(
        query_or_placeholder(run)
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value))),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Configuration", heading)));
    let assistant = match run.config.as_ref() {
        Some(config) if !config.assistant_name.is_empty() => config.assistant_name.clone(),
        _ => "unknown".to_string(),
    };
    let pro_tools = run
        .config
        .as_ref()
        .map_or("unknown", |config| yes_no(config.use_pro_tools));
    lines.push(Line::from(vec![
        Span::styled("Assistant: ", label),
        Span::styled(assistant, value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Budget: ", label),
        Span::styled(budget_or_unknown(run).to_string(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Pro Tools: ", label),
        Span::styled(pro_tools, value),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Timing", heading)));
    lines.push(Line::from(vec![
        Span::styled("Created: ", label),
        Span::styled(format_timestamp(&run.created_at), value),
    ]));
    if let Some(completed) = run.completed_at.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Completed: ", label),
            Span::styled(format_timestamp(completed), value),
        ]));
    }

    if let Some(result) = run.result.as_deref().filter(|r| !r.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Result", heading)));
        lines.extend(
            result
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), value))),
        );
    }

    lines
}

fn render_run_details(frame: &mut Frame, run: &Run, scroll: u16) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(detail_lines(run))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Run Details ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Available Tools tab
// ============================================================================

fn render_tools_tab(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_tool_tier(frame, chunks[0], ToolTier::Rapid, Color::Green);
    render_tool_tier(frame, chunks[1], ToolTier::Pro, Color::Magenta);
}

fn render_tool_tier(frame: &mut Frame, area: Rect, tier: ToolTier, accent: Color) {
    let mut lines = Vec::new();
    for tool in tools_in(tier) {
        lines.push(Line::from(vec![
            Span::styled(
                tool.name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(format!("[{}]", tier.badge()), Style::default().fg(accent)),
        ]));
        lines.push(Line::from(Span::styled(
            tool.description,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", tier.title())),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer and helpers
// ============================================================================

/// Key help for the current view.
pub fn help_text(app: &DashboardApp) -> &'static str {
    if app.is_showing_details() {
        return " ↑↓/PgUp/PgDn: scroll | Enter/Esc: close details ";
    }
    match app.current_tab() {
        Tab::Agent => " Tab: switch view | ↑↓: field | ←→/Space: change | Enter: run | Ctrl+C: quit ",
        Tab::History => " Tab: switch view | ↑↓: navigate | Enter: details | R: refresh | D: delete | Q: quit ",
        Tab::Tools => " Tab: switch view | Q: quit ",
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let mut spans = vec![Span::styled(
        help_text(app),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(error) = app.visible_error() {
        spans.push(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_color(run: &Run) -> Color {
    match StatusTone::of(&run.status) {
        StatusTone::Success => Color::Green,
        StatusTone::Danger => Color::Red,
        StatusTone::Warning => Color::Yellow,
        StatusTone::Neutral => Color::Blue,
    }
}

/// Create a centered rectangle of given percentage width/height
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
