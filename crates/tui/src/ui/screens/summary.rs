use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use engine::Direction as Owing;

use crate::{
    app::AppState,
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(settlement) = state.settlement.as_ref().filter(|s| s.entries > 0) else {
        let block = Block::default().title("Summary").borders(Borders::ALL);
        let text = match &state.load_error {
            Some(err) => Line::styled(err.as_str(), Style::default().fg(theme.error)),
            None => Line::styled(
                "Add an expense to see the settlement.",
                Style::default().fg(theme.text_muted),
            ),
        };
        frame.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(state.roster().len() as u16 + 2),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let people = state
        .roster()
        .names()
        .iter()
        .map(|name| {
            Line::from(vec![
                Span::styled(format!("{name:<12}"), Style::default().fg(theme.text)),
                Span::styled("paid ", Style::default().fg(theme.text_muted)),
                money::plain_amount(settlement.paid_by(name), theme),
                Span::styled("   net ", Style::default().fg(theme.text_muted)),
                money::styled_balance(settlement.balance_of(name), theme),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(people).block(Block::default().title("Participants").borders(Borders::ALL)),
        layout[0],
    );

    let advice = match (settlement.direction, settlement.transfer(state.roster())) {
        (Some(Owing::Balanced), _) => Line::styled(
            "All settled, nobody owes anything.",
            Style::default().fg(theme.positive),
        ),
        (_, Some(transfer)) => Line::from(vec![
            Span::styled(transfer.from.to_string(), Style::default().fg(theme.warning)),
            Span::raw(" pays "),
            Span::styled(transfer.to.to_string(), Style::default().fg(theme.warning)),
            Span::raw(" "),
            money::styled_amount_bold(transfer.amount, theme),
        ]),
        _ => Line::styled(
            "Settlement needs exactly two participants.",
            Style::default().fg(theme.text_muted),
        ),
    };
    let total = Line::from(vec![
        Span::styled("Trip total ", Style::default().fg(theme.text_muted)),
        money::styled_amount_bold(settlement.total, theme),
    ]);
    let mut lines = vec![advice, Line::raw(""), total];
    if settlement.skipped_rows > 0 {
        lines.push(Line::styled(
            format!("{} unreadable rows left out", settlement.skipped_rows),
            Style::default().fg(theme.text_muted),
        ));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Settlement").borders(Borders::ALL)),
        layout[1],
    );
}
