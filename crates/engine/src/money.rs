//! Amount parsing and display helpers.
//!
//! Amounts are plain `f64` values during accumulation. They are truncated to
//! whole units only when shown, so many small entries do not compound
//! rounding error.

use crate::Currency;

/// Parses an amount typed by a user or read from a sheet cell.
///
/// Surrounding blanks are ignored and `,` is accepted as a thousands
/// separator (`"1,200"` is 1200). Returns `None` for empty input, text that is
/// not a number, and non-finite values.
///
/// ```rust
/// use engine::money::parse_amount;
///
/// assert_eq!(parse_amount("1,200"), Some(1200.0));
/// assert_eq!(parse_amount(" 207.5 "), Some(207.5));
/// assert_eq!(parse_amount("abc"), None);
/// assert_eq!(parse_amount("NaN"), None);
/// ```
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Truncates toward zero to whole currency units.
#[must_use]
pub fn whole_units(value: f64) -> i64 {
    value.trunc() as i64
}

/// Formats `value` as whole units with the currency symbol, e.g. `NT$ 146`.
#[must_use]
pub fn format_whole(value: f64, currency: Currency) -> String {
    format!("{} {}", currency.symbol(), whole_units(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(whole_units(146.99), 146);
        assert_eq!(whole_units(-146.25), -146);
        assert_eq!(whole_units(0.4), 0);
    }

    #[test]
    fn formats_local_amounts() {
        assert_eq!(format_whole(146.25, Currency::Twd), "NT$ 146");
        assert_eq!(format_whole(-3.9, Currency::Twd), "NT$ -3");
        assert_eq!(format_whole(1200.0, Currency::Jpy), "¥ 1200");
    }

    #[test]
    fn parse_rejects_blank_and_infinite() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("-5"), Some(-5.0));
    }
}
