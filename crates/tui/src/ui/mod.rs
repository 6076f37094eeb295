pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Add => screens::add::render(frame, layout[2], state, &theme),
        Section::List => screens::list::render(frame, layout[2], state, &theme),
        Section::Summary => screens::summary::render(frame, layout[2], state, &theme),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let synced = state
        .last_synced
        .map(|dt| dt.with_timezone(&state.timezone).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = if state.load_error.is_some() {
        ("ERR", Style::default().fg(theme.error))
    } else {
        ("OK", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled("Rate", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": 1 JPY = {} TWD  ", state.trip.exchange_rate)),
        Span::styled("Ledger", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.location)),
        Span::styled("Last sync", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {synced}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+R", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" refresh"));

    let context_hints = context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(label),
        ]
    };
    match state.section {
        Section::Add if state.form.focus.is_text() => [
            hint("Tab", " next  "),
            hint("Enter", " save  "),
            hint("Esc", " clear"),
        ]
        .concat(),
        Section::Add => [
            hint("←/→", " choose  "),
            hint("Space", " toggle  "),
            hint("Enter", " save"),
        ]
        .concat(),
        Section::List => [hint("j/k", " move  "), hint("r", " refresh")].concat(),
        Section::Summary => hint("r", " refresh").to_vec(),
    }
}
