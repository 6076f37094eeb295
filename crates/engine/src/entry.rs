use api_types::sheet::SheetRow;

use crate::{Currency, MalformedRow, money::parse_amount};

/// One expense of the trip, as recorded in the ledger.
///
/// Entries are never edited once appended. Entries read back from the sheet
/// are parsed leniently (see the `TryFrom<&SheetRow>` impl), so `date` and
/// `item` are kept as the text found in the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseEntry {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub item: String,
    /// Amount in `currency`.
    pub amount: f64,
    pub currency: Currency,
    pub payer: String,
    /// Participants splitting the cost equally. Never empty, no duplicates.
    pub involved: Vec<String>,
    /// Number of equal parts the amount is divided into. Equals
    /// `involved.len()` for validated entries; stored rows also count blank
    /// segments of the `Involved` cell.
    pub split_ways: usize,
}

impl ExpenseEntry {
    /// Amount converted to the local currency.
    #[must_use]
    pub fn amount_local(&self, rate: f64) -> f64 {
        self.currency.to_local(self.amount, rate)
    }

    /// Local amount charged to each involved participant.
    #[must_use]
    pub fn share_local(&self, rate: f64) -> f64 {
        self.amount_local(rate) / self.split_ways.max(1) as f64
    }
}

/// Splits an `Involved` cell (`"Christen, Bill"`) into names.
///
/// Names are trimmed; empty segments and repeated names are dropped.
#[must_use]
pub fn split_involved(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Inverse of [`split_involved`].
#[must_use]
pub fn join_involved(names: &[String]) -> String {
    names.join(", ")
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl TryFrom<&SheetRow> for ExpenseEntry {
    type Error = MalformedRow;

    /// Parses a stored row.
    ///
    /// Only the columns the settlement needs are mandatory: `Amount`, `Payer`
    /// and `Involved`. The `Currency` cell never rejects a row, see
    /// [`Currency::from_cell`].
    fn try_from(row: &SheetRow) -> Result<Self, Self::Error> {
        let raw_amount = non_blank(row.amount.as_ref()).ok_or(MalformedRow::Missing("Amount"))?;
        let amount =
            parse_amount(raw_amount).ok_or_else(|| MalformedRow::Amount(raw_amount.to_string()))?;

        let currency = Currency::from_cell(row.currency.as_deref());

        let payer = non_blank(row.payer.as_ref()).ok_or(MalformedRow::Missing("Payer"))?;
        let involved_raw =
            non_blank(row.involved.as_ref()).ok_or(MalformedRow::Missing("Involved"))?;
        let involved = split_involved(involved_raw);
        if involved.is_empty() {
            return Err(MalformedRow::NoneInvolved);
        }

        Ok(ExpenseEntry {
            date: row.date.as_deref().unwrap_or_default().trim().to_string(),
            item: row.item.as_deref().unwrap_or_default().trim().to_string(),
            amount,
            currency,
            payer: payer.to_string(),
            involved,
            split_ways: involved_raw.split(',').count(),
        })
    }
}

impl From<&ExpenseEntry> for SheetRow {
    fn from(entry: &ExpenseEntry) -> Self {
        SheetRow {
            date: Some(entry.date.clone()),
            item: Some(entry.item.clone()),
            amount: Some(entry.amount.to_string()),
            currency: Some(entry.currency.code().to_string()),
            payer: Some(entry.payer.clone()),
            involved: Some(join_involved(&entry.involved)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(amount: &str, currency: &str, payer: &str, involved: &str) -> SheetRow {
        SheetRow {
            date: Some("2026-01-05".to_string()),
            item: Some("Sushi".to_string()),
            amount: Some(amount.to_string()),
            currency: Some(currency.to_string()),
            payer: Some(payer.to_string()),
            involved: Some(involved.to_string()),
        }
    }

    #[test]
    fn parses_a_complete_row() {
        let entry = ExpenseEntry::try_from(&row("1000", "JPY", " Bill ", "Christen, Bill")).unwrap();
        assert_eq!(entry.amount, 1000.0);
        assert_eq!(entry.currency, Currency::Jpy);
        assert_eq!(entry.payer, "Bill");
        assert_eq!(entry.involved, ["Christen", "Bill"]);
        assert_eq!(entry.amount_local(0.2075), 207.5);
    }

    #[test]
    fn non_numeric_amount_is_malformed() {
        let err = ExpenseEntry::try_from(&row("lots", "TWD", "Bill", "Bill")).unwrap_err();
        assert_eq!(err, MalformedRow::Amount("lots".to_string()));
    }

    #[test]
    fn missing_involved_is_malformed() {
        let mut r = row("10", "TWD", "Bill", "");
        assert_eq!(
            ExpenseEntry::try_from(&r).unwrap_err(),
            MalformedRow::Missing("Involved")
        );
        r.involved = Some(" , ,".to_string());
        assert_eq!(
            ExpenseEntry::try_from(&r).unwrap_err(),
            MalformedRow::NoneInvolved
        );
    }

    #[test]
    fn unknown_or_blank_currency_counts_as_local() {
        for code in ["", "NTD", "EUR", "jpy"] {
            let entry = ExpenseEntry::try_from(&row("100", code, "Bill", "Bill")).unwrap();
            assert_eq!(entry.currency, Currency::Twd, "currency cell {code:?}");
            assert_eq!(entry.amount_local(0.2075), 100.0);
        }
    }

    #[test]
    fn blank_involved_segments_still_take_a_share() {
        let entry = ExpenseEntry::try_from(&row("100", "TWD", "Bill", "Bill, ")).unwrap();
        assert_eq!(entry.involved, ["Bill"]);
        assert_eq!(entry.split_ways, 2);
        assert_eq!(entry.share_local(0.2075), 50.0);
    }

    #[test]
    fn involved_is_trimmed_and_deduplicated() {
        assert_eq!(split_involved("Bill,Christen , Bill,"), ["Bill", "Christen"]);
    }

    #[test]
    fn entry_encodes_to_sheet_row() {
        let entry = ExpenseEntry {
            date: "2026-01-05".to_string(),
            item: "Taxi".to_string(),
            amount: 1200.0,
            currency: Currency::Jpy,
            payer: "Christen".to_string(),
            involved: vec!["Christen".to_string(), "Bill".to_string()],
            split_ways: 2,
        };
        let row = SheetRow::from(&entry);
        assert_eq!(row.amount.as_deref(), Some("1200"));
        assert_eq!(row.currency.as_deref(), Some("JPY"));
        assert_eq!(row.involved.as_deref(), Some("Christen, Bill"));
    }
}
