use engine::{Currency, money::format_whole};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Creates a span for a local amount in whole units, no coloring.
#[must_use]
pub fn plain_amount(amount: f64, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_whole(amount, Currency::LOCAL),
        Style::default().fg(theme.text),
    )
}

/// Creates a styled span for a net balance with semantic coloring.
///
/// - Positive balances (owed money): green with `+` prefix
/// - Negative balances (owing money): red
/// - Zero after truncation: neutral text color
#[must_use]
pub fn styled_balance(balance: f64, theme: &Theme) -> Span<'static> {
    let whole = engine::money::whole_units(balance);
    let (color, prefix) = if whole > 0 {
        (theme.positive, "+")
    } else if whole < 0 {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(
        format!("{prefix}{}", format_whole(balance, Currency::LOCAL)),
        Style::default().fg(color),
    )
}

/// Creates a bold span for emphasized amounts (transfers, totals).
#[must_use]
pub fn styled_amount_bold(amount: f64, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_whole(amount, Currency::LOCAL),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )
}

/// Formats a stored cell amount with its currency symbol, keeping the
/// original text when it does not parse.
#[must_use]
pub fn row_amount(amount: &str, currency: Option<&str>) -> String {
    let currency = Currency::from_cell(currency);
    match engine::money::parse_amount(amount) {
        Some(value) if value.fract() == 0.0 => format!("{} {}", currency.symbol(), value),
        Some(value) => format!("{} {value:.2}", currency.symbol()),
        None => amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_sign_and_color() {
        let theme = Theme::default();
        let owed = styled_balance(146.25, &theme);
        assert_eq!(owed.content, "+NT$ 146");
        assert_eq!(owed.style.fg, Some(theme.positive));

        let owing = styled_balance(-146.25, &theme);
        assert_eq!(owing.content, "NT$ -146");
        assert_eq!(owing.style.fg, Some(theme.negative));

        let settled = styled_balance(0.7, &theme);
        assert_eq!(settled.content, "NT$ 0");
        assert_eq!(settled.style.fg, Some(theme.text));
    }

    #[test]
    fn row_amounts_keep_their_currency() {
        assert_eq!(row_amount("1500", Some("JPY")), "¥ 1500");
        assert_eq!(row_amount("12.5", Some("TWD")), "NT$ 12.50");
        assert_eq!(row_amount("300", None), "NT$ 300");
        assert_eq!(row_amount("n/a", Some("JPY")), "n/a");
        assert_eq!(row_amount("80", Some("EUR")), "NT$ 80");
    }
}
