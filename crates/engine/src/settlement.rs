//! Settlement of the shared ledger.
//!
//! [`settle`] is a pure function of the stored rows, the exchange rate and the
//! roster. Balances are computed for every participant; the reduction to one
//! transfer is only done when the roster is a pair.

use std::collections::BTreeMap;

use api_types::sheet::SheetRow;

use crate::{ExpenseEntry, Roster};

/// Who pays whom, with the roster read as `[A, B]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Balanced,
    AOwesB,
    BOwesA,
}

/// A single payment that zeroes both balances.
#[derive(Clone, Debug, PartialEq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settlement {
    /// Amounts fronted by each participant, in local currency.
    pub paid: BTreeMap<String, f64>,
    /// Equal-split portions owed by each participant, in local currency.
    pub fair_share: BTreeMap<String, f64>,
    /// `paid - fair_share`. Positive means the participant is owed money.
    pub balance: BTreeMap<String, f64>,
    /// Local total of every parsed entry, whoever paid it.
    pub total: f64,
    /// `None` unless the roster has exactly two names.
    pub direction: Option<Direction>,
    /// Amount of the transfer, always `>= 0`.
    pub amount: f64,
    pub entries: usize,
    pub skipped_rows: usize,
}

impl Settlement {
    #[must_use]
    pub fn paid_by(&self, name: &str) -> f64 {
        self.paid.get(name).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn fair_share_of(&self, name: &str) -> f64 {
        self.fair_share.get(name).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn balance_of(&self, name: &str) -> f64 {
        self.balance.get(name).copied().unwrap_or_default()
    }

    /// The transfer to make, or `None` when balanced or not a pair.
    #[must_use]
    pub fn transfer<'a>(&self, roster: &'a Roster) -> Option<Transfer<'a>> {
        let (a, b) = roster.pair()?;
        let (from, to) = match self.direction? {
            Direction::Balanced => return None,
            Direction::AOwesB => (a, b),
            Direction::BOwesA => (b, a),
        };
        Some(Transfer {
            from,
            to,
            amount: self.amount,
        })
    }
}

/// Settles the stored rows.
///
/// Rows that do not parse are skipped and only counted in
/// [`Settlement::skipped_rows`].
pub fn settle<'a, I>(rows: I, rate: f64, roster: &Roster, balanced_below: f64) -> Settlement
where
    I: IntoIterator<Item = &'a SheetRow>,
{
    let mut skipped = 0usize;
    let entries: Vec<ExpenseEntry> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match ExpenseEntry::try_from(row) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                tracing::debug!("skipping ledger row {index}: {reason}");
                skipped += 1;
                None
            }
        })
        .collect();

    let mut settlement = settle_entries(&entries, rate, roster, balanced_below);
    settlement.skipped_rows = skipped;
    settlement
}

/// Settles already parsed entries.
pub fn settle_entries(
    entries: &[ExpenseEntry],
    rate: f64,
    roster: &Roster,
    balanced_below: f64,
) -> Settlement {
    let zeroes = || -> BTreeMap<String, f64> {
        roster.names().iter().map(|n| (n.clone(), 0.0)).collect()
    };
    let mut paid = zeroes();
    let mut fair_share = zeroes();
    let mut total = 0.0;

    for entry in entries {
        let amount = entry.amount_local(rate);
        total += amount;

        if let Some(bucket) = paid.get_mut(entry.payer.as_str()) {
            *bucket += amount;
        }

        let share = entry.share_local(rate);
        for name in &entry.involved {
            if let Some(bucket) = fair_share.get_mut(name.as_str()) {
                *bucket += share;
            }
        }
    }

    let balance: BTreeMap<String, f64> = roster
        .names()
        .iter()
        .map(|n| (n.clone(), paid[n] - fair_share[n]))
        .collect();

    let (direction, amount) = match roster.pair() {
        Some((a, _)) => {
            let diff = balance[a];
            if diff.abs() < balanced_below {
                (Some(Direction::Balanced), 0.0)
            } else if diff > 0.0 {
                (Some(Direction::BOwesA), diff)
            } else {
                (Some(Direction::AOwesB), diff.abs())
            }
        }
        None => (None, 0.0),
    };

    Settlement {
        paid,
        fair_share,
        balance,
        total,
        direction,
        amount,
        entries: entries.len(),
        skipped_rows: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    const RATE: f64 = 0.2075;

    fn roster() -> Roster {
        Roster::new(["A", "B"]).unwrap()
    }

    fn entry(amount: f64, currency: Currency, payer: &str, involved: &[&str]) -> ExpenseEntry {
        ExpenseEntry {
            date: "2026-01-01".to_string(),
            item: "x".to_string(),
            amount,
            currency,
            payer: payer.to_string(),
            involved: involved.iter().map(|s| s.to_string()).collect(),
            split_ways: involved.len(),
        }
    }

    #[test]
    fn empty_ledger_is_balanced() {
        let s = settle_entries(&[], RATE, &roster(), 1.0);
        assert_eq!(s.total, 0.0);
        assert_eq!(s.direction, Some(Direction::Balanced));
        assert_eq!(s.transfer(&roster()), None);
    }

    #[test]
    fn unknown_payer_counts_only_in_total() {
        let s = settle_entries(
            &[entry(100.0, Currency::Twd, "Z", &["A", "B"])],
            RATE,
            &roster(),
            1.0,
        );
        assert_eq!(s.total, 100.0);
        assert_eq!(s.paid_by("A"), 0.0);
        assert_eq!(s.paid_by("B"), 0.0);
        assert_eq!(s.fair_share_of("A"), 50.0);
    }

    #[test]
    fn unknown_involved_name_loses_its_share() {
        let s = settle_entries(
            &[entry(90.0, Currency::Twd, "A", &["A", "B", "Z"])],
            RATE,
            &roster(),
            1.0,
        );
        assert_eq!(s.fair_share_of("A"), 30.0);
        assert_eq!(s.fair_share_of("B"), 30.0);
        assert!(!s.fair_share.contains_key("Z"));
        assert_eq!(s.balance_of("A"), 60.0);
    }

    #[test]
    fn more_than_two_participants_has_no_direction() {
        let roster = Roster::new(["A", "B", "C"]).unwrap();
        let s = settle_entries(
            &[entry(90.0, Currency::Twd, "A", &["A", "B", "C"])],
            RATE,
            &roster,
            1.0,
        );
        assert_eq!(s.direction, None);
        assert_eq!(s.balance_of("C"), -30.0);
        assert_eq!(s.transfer(&roster), None);
    }

    #[test]
    fn transfer_names_debtor_and_creditor() {
        let r = roster();
        let s = settle_entries(&[entry(10.0, Currency::Twd, "B", &["A"])], RATE, &r, 1.0);
        assert_eq!(s.direction, Some(Direction::AOwesB));
        assert_eq!(
            s.transfer(&r),
            Some(Transfer {
                from: "A",
                to: "B",
                amount: 10.0
            })
        );
    }

    fn stored(amount: &str, currency: &str, payer: &str, involved: &str) -> SheetRow {
        SheetRow {
            amount: Some(amount.to_string()),
            currency: Some(currency.to_string()),
            payer: Some(payer.to_string()),
            involved: Some(involved.to_string()),
            ..SheetRow::default()
        }
    }

    #[test]
    fn unrecognized_currency_is_settled_as_local() {
        let s = settle(&[stored("100", "NTD", "A", "A, B")], RATE, &roster(), 1.0);
        assert_eq!(s.skipped_rows, 0);
        assert_eq!(s.total, 100.0);
        assert_eq!(s.paid_by("A"), 100.0);
        assert_eq!(s.fair_share_of("B"), 50.0);
    }

    #[test]
    fn blank_involved_segment_keeps_its_slot_in_the_split() {
        let s = settle(&[stored("100", "TWD", "B", "A, ")], RATE, &roster(), 1.0);
        assert_eq!(s.fair_share_of("A"), 50.0);
        assert_eq!(s.balance_of("B"), 100.0);
        assert_eq!(s.balance_of("A"), -50.0);
    }
}
