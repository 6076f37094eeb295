//! Core of tripsplit: a shared expense ledger for a two-person trip.
//!
//! - [`validate`] turns an [`EntryDraft`] into an [`ExpenseEntry`].
//! - [`Ledger`] reads and appends to a [`LedgerStore`] with a session cache
//!   ([`SyncState`]).
//! - [`settle`] computes who paid what, fair shares and the transfer that
//!   settles the two parties.
pub use config::TripConfig;
pub use currency::Currency;
pub use entry::{ExpenseEntry, join_involved, split_involved};
pub use error::{EngineError, EntryField, MalformedRow, ValidationError, Violation};
pub use ledger::{Ledger, LedgerBuilder};
pub use roster::Roster;
pub use settlement::{Direction, Settlement, Transfer, settle, settle_entries};
pub use store::{CsvStore, Freshness, LedgerStore, MemoryStore};
pub use sync::{Snapshot, SyncState};
pub use validate::{EntryDraft, validate};

pub mod config;
pub mod money;
pub mod store;

mod currency;
mod entry;
mod error;
mod ledger;
mod roster;
mod settlement;
mod sync;
mod validate;

pub type ResultEngine<T> = Result<T, EngineError>;
