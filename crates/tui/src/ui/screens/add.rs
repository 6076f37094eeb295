use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::{AddField, AddForm, AppState},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let form = &state.form;
    let lines = AddField::ALL
        .iter()
        .map(|field| field_line(*field, form, state, theme))
        .collect::<Vec<_>>();

    let block = Block::default()
        .title("New expense")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), layout[0]);

    let message = match &form.errors {
        Some(errors) => Line::from(Span::styled(
            errors.to_string(),
            Style::default().fg(theme.error),
        )),
        None => Line::from(Span::styled(
            "Date as YYYY-MM-DD. Amounts use the selected currency.",
            Style::default().fg(theme.text_muted),
        )),
    };
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn field_line<'a>(
    field: AddField,
    form: &'a AddForm,
    state: &'a AppState,
    theme: &Theme,
) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if form.has_error(field) {
        Style::default().fg(theme.error)
    } else if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let marker = if focused { "» " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(format!("{:<12}", field.label()), label_style),
    ];

    let cursor = if focused { "_" } else { "" };
    match field {
        AddField::Date => spans.push(Span::raw(format!("{}{cursor}", form.draft.date))),
        AddField::Item => spans.push(Span::raw(format!("{}{cursor}", form.draft.item))),
        AddField::Amount => spans.push(Span::raw(format!(
            "{} {}{cursor}",
            form.draft.currency.symbol(),
            form.draft.amount
        ))),
        AddField::Currency => {
            for currency in engine::Currency::ALL {
                spans.push(choice(
                    currency.code(),
                    currency == form.draft.currency,
                    false,
                    theme,
                ));
            }
        }
        AddField::Payer => {
            for name in state.roster().names() {
                spans.push(choice(name, *name == form.draft.payer, false, theme));
            }
        }
        AddField::Involved => {
            for (i, name) in state.roster().names().iter().enumerate() {
                let highlighted = focused && i == form.involved_cursor;
                let mark = if form.is_involved(name) { "[x] " } else { "[ ] " };
                spans.push(choice(
                    &format!("{mark}{name}"),
                    form.is_involved(name),
                    highlighted,
                    theme,
                ));
            }
        }
    }

    Line::from(spans)
}

fn choice(label: &str, selected: bool, highlighted: bool, theme: &Theme) -> Span<'static> {
    let mut style = if selected {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    if highlighted {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!(" {label} "), style)
}
