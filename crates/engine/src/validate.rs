//! Validation of new entries before they are appended to the ledger.

use chrono::NaiveDate;

use crate::{
    Currency, ExpenseEntry, Roster, ValidationError, Violation, entry::split_involved,
    money::parse_amount,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw fields of an entry as typed in the add form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryDraft {
    pub date: String,
    pub item: String,
    pub amount: String,
    pub currency: Currency,
    pub payer: String,
    pub involved: Vec<String>,
}

impl EntryDraft {
    /// A draft dated `date`, paid by the first participant and split among
    /// everybody.
    #[must_use]
    pub fn new(date: NaiveDate, roster: &Roster) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            item: String::new(),
            amount: String::new(),
            currency: Currency::LOCAL,
            payer: roster.names().first().cloned().unwrap_or_default(),
            involved: roster.names().to_vec(),
        }
    }
}

/// Checks a draft and turns it into an [`ExpenseEntry`].
///
/// All violations are collected, not just the first one.
pub fn validate(draft: &EntryDraft, roster: &Roster) -> Result<ExpenseEntry, ValidationError> {
    let mut violations = Vec::new();

    let date = NaiveDate::parse_from_str(draft.date.trim(), DATE_FORMAT);
    if date.is_err() {
        violations.push(Violation::InvalidDate(draft.date.trim().to_string()));
    }

    let item = draft.item.trim();
    if item.is_empty() {
        violations.push(Violation::EmptyItem);
    }

    let amount = match parse_amount(&draft.amount) {
        Some(value) if value > 0.0 => Some(value),
        Some(_) => {
            violations.push(Violation::NonPositiveAmount);
            None
        }
        None if draft.amount.trim().is_empty() => {
            violations.push(Violation::NonPositiveAmount);
            None
        }
        None => {
            violations.push(Violation::InvalidAmount(draft.amount.trim().to_string()));
            None
        }
    };

    let payer = draft.payer.trim();
    if !roster.contains(payer) {
        violations.push(Violation::UnknownPayer(payer.to_string()));
    }

    let involved = split_involved(&draft.involved.join(","));
    if involved.is_empty() {
        violations.push(Violation::NoParticipants);
    }
    for name in involved.iter().filter(|n| !roster.contains(n)) {
        violations.push(Violation::UnknownParticipant(name.clone()));
    }

    match (date, amount) {
        (Ok(date), Some(amount)) if violations.is_empty() => Ok(ExpenseEntry {
            date: date.format(DATE_FORMAT).to_string(),
            item: item.to_string(),
            amount,
            currency: draft.currency,
            payer: payer.to_string(),
            split_ways: involved.len(),
            involved,
        }),
        _ => Err(ValidationError::new(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryField;

    fn roster() -> Roster {
        Roster::new(["Christen", "Bill"]).unwrap()
    }

    fn draft() -> EntryDraft {
        EntryDraft {
            date: "2026-01-04".to_string(),
            item: "Ichiran".to_string(),
            amount: "2360".to_string(),
            currency: Currency::Jpy,
            payer: "Bill".to_string(),
            involved: vec!["Christen".to_string(), "Bill".to_string()],
        }
    }

    #[test]
    fn valid_draft_becomes_entry() {
        let entry = validate(&draft(), &roster()).unwrap();
        assert_eq!(entry.item, "Ichiran");
        assert_eq!(entry.amount, 2360.0);
        assert_eq!(entry.involved, ["Christen", "Bill"]);
    }

    #[test]
    fn empty_item_is_rejected() {
        let mut d = draft();
        d.item = "  ".to_string();
        let err = validate(&d, &roster()).unwrap_err();
        assert_eq!(err.violations(), [Violation::EmptyItem]);
    }

    #[test]
    fn zero_negative_and_blank_amounts_are_rejected() {
        for amount in ["0", "-3", ""] {
            let mut d = draft();
            d.amount = amount.to_string();
            let err = validate(&d, &roster()).unwrap_err();
            assert_eq!(err.violations(), [Violation::NonPositiveAmount], "{amount}");
        }
    }

    #[test]
    fn empty_involved_is_rejected() {
        let mut d = draft();
        d.involved.clear();
        let err = validate(&d, &roster()).unwrap_err();
        assert!(err.touches(EntryField::Involved));
    }

    #[test]
    fn collects_every_violation() {
        let d = EntryDraft {
            date: "04/01/2026".to_string(),
            item: String::new(),
            amount: "abc".to_string(),
            currency: Currency::Twd,
            payer: "Mallory".to_string(),
            involved: vec!["Bill".to_string(), "Eve".to_string()],
        };
        let err = validate(&d, &roster()).unwrap_err();
        assert_eq!(
            err.violations(),
            [
                Violation::InvalidDate("04/01/2026".to_string()),
                Violation::EmptyItem,
                Violation::InvalidAmount("abc".to_string()),
                Violation::UnknownPayer("Mallory".to_string()),
                Violation::UnknownParticipant("Eve".to_string()),
            ]
        );
    }

    #[test]
    fn new_draft_defaults_to_everyone() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let d = EntryDraft::new(date, &roster());
        assert_eq!(d.date, "2026-01-02");
        assert_eq!(d.payer, "Christen");
        assert_eq!(d.involved, ["Christen", "Bill"]);
    }
}
