use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    ui::{components::money::row_amount, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default().title("Expenses").borders(Borders::ALL);

    let Some(snapshot) = state.snapshot.as_ref().filter(|s| s.listing().next().is_some()) else {
        let text = match &state.load_error {
            Some(err) => Line::styled(err.as_str(), Style::default().fg(theme.error)),
            None => Line::styled("No expenses recorded yet.", Style::default().fg(theme.text_muted)),
        };
        frame.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            area,
        );
        return;
    };

    let cell = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();
    let items = snapshot
        .listing()
        .map(|row| {
            let amount = row_amount(&cell(&row.amount), row.currency.as_deref());
            let text = format!(
                "{:<10}  {:<24} {:>12}  {:<10} {}",
                cell(&row.date),
                cell(&row.item),
                amount,
                cell(&row.payer),
                cell(&row.involved)
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.list_selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
