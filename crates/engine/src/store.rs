//! Access to the shared ledger sheet.
//!
//! A [`LedgerStore`] only knows how to read every row and how to replace the
//! whole sheet. Appending is done one level up by [`crate::Ledger`] as a
//! fresh read followed by an overwrite, since the remote sheet offers no
//! finer-grained locking.

use api_types::sheet::SheetRow;

use crate::ResultEngine;

pub use csv_file::CsvStore;
pub use memory::MemoryStore;

mod csv_file;
mod memory;

/// Whether a ledger read may be served from the session cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Freshness {
    /// A snapshot younger than the cache TTL is good enough.
    #[default]
    Cached,
    /// Always read the current remote state.
    ForceFresh,
}

/// Remote tabular store holding the ledger rows.
pub trait LedgerStore {
    /// Reads every row, in sheet order. Never cached.
    fn read_rows(&self) -> impl Future<Output = ResultEngine<Vec<SheetRow>>> + Send;

    /// Replaces the whole sheet with `rows`.
    fn overwrite_rows(&self, rows: &[SheetRow]) -> impl Future<Output = ResultEngine<()>> + Send;

    /// Human readable location, used in logs.
    fn location(&self) -> String;
}
