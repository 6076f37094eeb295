use chrono::NaiveDate;
use engine::{EntryDraft, EntryField, Roster, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Date,
    Item,
    Amount,
    Currency,
    Payer,
    Involved,
}

impl AddField {
    pub const ALL: [AddField; 6] = [
        AddField::Date,
        AddField::Item,
        AddField::Amount,
        AddField::Currency,
        AddField::Payer,
        AddField::Involved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Item => "Item",
            Self::Amount => "Amount",
            Self::Currency => "Currency",
            Self::Payer => "Paid by",
            Self::Involved => "Split among",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the field takes typed text.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Date | Self::Item | Self::Amount)
    }

    fn entry_field(self) -> Option<EntryField> {
        match self {
            Self::Date => Some(EntryField::Date),
            Self::Item => Some(EntryField::Item),
            Self::Amount => Some(EntryField::Amount),
            Self::Currency => None,
            Self::Payer => Some(EntryField::Payer),
            Self::Involved => Some(EntryField::Involved),
        }
    }
}

/// State of the add form.
#[derive(Debug, Clone)]
pub struct AddForm {
    pub draft: EntryDraft,
    pub focus: AddField,
    /// Highlighted participant in the "split among" selector.
    pub involved_cursor: usize,
    pub errors: Option<ValidationError>,
}

impl AddForm {
    pub fn new(today: NaiveDate, roster: &Roster) -> Self {
        Self {
            draft: EntryDraft::new(today, roster),
            focus: AddField::Date,
            involved_cursor: 0,
            errors: None,
        }
    }

    /// Back to defaults after a successful submit.
    pub fn reset(&mut self, today: NaiveDate, roster: &Roster) {
        *self = Self {
            focus: AddField::Item,
            ..Self::new(today, roster)
        };
    }

    pub fn has_error(&self, field: AddField) -> bool {
        match (&self.errors, field.entry_field()) {
            (Some(errors), Some(field)) => errors.touches(field),
            _ => false,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            AddField::Date => Some(&mut self.draft.date),
            AddField::Item => Some(&mut self.draft.item),
            AddField::Amount => Some(&mut self.draft.amount),
            _ => None,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if self.focus == AddField::Amount && !(ch.is_ascii_digit() || matches!(ch, '.' | ',')) {
            return;
        }
        if let Some(text) = self.text_mut() {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn toggle_currency(&mut self) {
        self.draft.currency = self.draft.currency.toggle();
    }

    pub fn cycle_payer(&mut self, roster: &Roster, forward: bool) {
        let names = roster.names();
        if names.is_empty() {
            return;
        }
        let current = names
            .iter()
            .position(|n| *n == self.draft.payer)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % names.len()
        } else {
            (current + names.len() - 1) % names.len()
        };
        self.draft.payer = names[next].clone();
    }

    pub fn move_involved_cursor(&mut self, roster: &Roster, forward: bool) {
        let len = roster.len();
        if len == 0 {
            return;
        }
        self.involved_cursor = if forward {
            (self.involved_cursor + 1) % len
        } else {
            (self.involved_cursor + len - 1) % len
        };
    }

    /// Adds or removes the highlighted participant, keeping roster order.
    pub fn toggle_involved(&mut self, roster: &Roster) {
        let Some(name) = roster.names().get(self.involved_cursor) else {
            return;
        };
        let selected = !self.is_involved(name);
        let current = std::mem::take(&mut self.draft.involved);
        self.draft.involved = roster
            .names()
            .iter()
            .filter(|n| if *n == name { selected } else { current.contains(*n) })
            .cloned()
            .collect();
    }

    pub fn is_involved(&self, name: &str) -> bool {
        self.draft.involved.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
    }

    fn form() -> (AddForm, Roster) {
        let roster = Roster::default();
        (AddForm::new(today(), &roster), roster)
    }

    #[test]
    fn defaults_to_today_first_payer_and_everybody() {
        let (form, _) = form();
        assert_eq!(form.draft.date, "2026-01-02");
        assert_eq!(form.draft.payer, "Christen");
        assert_eq!(form.draft.involved, ["Christen", "Bill"]);
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(AddField::Involved.next(), AddField::Date);
        assert_eq!(AddField::Date.prev(), AddField::Involved);
        assert_eq!(AddField::Item.next(), AddField::Amount);
    }

    #[test]
    fn amount_accepts_only_numeric_characters() {
        let (mut form, _) = form();
        form.focus = AddField::Amount;
        for ch in "1a,5x00.5".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.draft.amount, "1,500.5");
        form.backspace();
        assert_eq!(form.draft.amount, "1,500.");
    }

    #[test]
    fn typing_on_selectors_is_ignored() {
        let (mut form, _) = form();
        form.focus = AddField::Payer;
        form.push_char('x');
        assert_eq!(form.draft.payer, "Christen");
    }

    #[test]
    fn payer_cycles_through_roster() {
        let (mut form, roster) = form();
        form.cycle_payer(&roster, true);
        assert_eq!(form.draft.payer, "Bill");
        form.cycle_payer(&roster, true);
        assert_eq!(form.draft.payer, "Christen");
        form.cycle_payer(&roster, false);
        assert_eq!(form.draft.payer, "Bill");
    }

    #[test]
    fn involved_toggle_keeps_roster_order() {
        let (mut form, roster) = form();
        form.toggle_involved(&roster);
        assert_eq!(form.draft.involved, ["Bill"]);
        form.move_involved_cursor(&roster, true);
        form.toggle_involved(&roster);
        assert!(form.draft.involved.is_empty());
        form.move_involved_cursor(&roster, true);
        form.toggle_involved(&roster);
        form.move_involved_cursor(&roster, true);
        form.toggle_involved(&roster);
        assert_eq!(form.draft.involved, ["Christen", "Bill"]);
    }

    #[test]
    fn reset_restores_defaults_and_clears_errors() {
        let (mut form, roster) = form();
        form.draft.item = "Taxi".to_string();
        form.toggle_currency();
        form.errors = engine::validate(&EntryDraft::default(), &roster).err();
        assert!(form.has_error(AddField::Item));

        form.reset(today(), &roster);
        assert!(form.draft.item.is_empty());
        assert_eq!(form.draft.currency, engine::Currency::LOCAL);
        assert!(form.errors.is_none());
        assert_eq!(form.focus, AddField::Item);
    }
}
