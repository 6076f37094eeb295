//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a new entry is rejected; nothing is written.
//! - [`StoreUnavailable`] thrown when the ledger store cannot be read or written.
//! - [`RefreshTooSoon`] thrown when a manual refresh lands inside the cooldown.
//! - [`InvalidConfig`] thrown when the trip configuration is unusable.
//!
//! Rows that fail to parse while settling are reported as [`MalformedRow`]
//! and never leave the settlement step.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`StoreUnavailable`]: EngineError::StoreUnavailable
//!  [`RefreshTooSoon`]: EngineError::RefreshTooSoon
//!  [`InvalidConfig`]: EngineError::InvalidConfig
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid entry: {0}")]
    Validation(#[from] ValidationError),
    #[error("Ledger store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Refresh too soon, wait {wait_secs}s")]
    RefreshTooSoon { wait_secs: u64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Field of a new entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryField {
    Date,
    Item,
    Amount,
    Payer,
    Involved,
}

impl EntryField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EntryField::Date => "date",
            EntryField::Item => "item",
            EntryField::Amount => "amount",
            EntryField::Payer => "payer",
            EntryField::Involved => "involved",
        }
    }
}

/// A single rule broken by a new entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("date must be YYYY-MM-DD, got \"{0}\"")]
    InvalidDate(String),
    #[error("item must not be empty")]
    EmptyItem,
    #[error("amount \"{0}\" is not a number")]
    InvalidAmount(String),
    #[error("amount must be > 0")]
    NonPositiveAmount,
    #[error("unknown payer \"{0}\"")]
    UnknownPayer(String),
    #[error("at least one participant must be involved")]
    NoParticipants,
    #[error("unknown participant \"{0}\"")]
    UnknownParticipant(String),
}

impl Violation {
    /// The entry field the violation refers to.
    #[must_use]
    pub const fn field(&self) -> EntryField {
        match self {
            Violation::InvalidDate(_) => EntryField::Date,
            Violation::EmptyItem => EntryField::Item,
            Violation::InvalidAmount(_) | Violation::NonPositiveAmount => EntryField::Amount,
            Violation::UnknownPayer(_) => EntryField::Payer,
            Violation::NoParticipants | Violation::UnknownParticipant(_) => EntryField::Involved,
        }
    }
}

/// Every violation found on a rejected entry, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if at least one violation concerns `field`.
    #[must_use]
    pub fn touches(&self, field: EntryField) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a stored row was left out of the settlement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRow {
    #[error("missing {0} column")]
    Missing(&'static str),
    #[error("amount \"{0}\" is not a number")]
    Amount(String),
    #[error("no participant listed in Involved")]
    NoneInvolved,
}
