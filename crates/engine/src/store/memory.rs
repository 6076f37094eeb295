use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use api_types::sheet::SheetRow;
use tokio::sync::RwLock;

use crate::{EngineError, ResultEngine, store::LedgerStore};

/// In-process sheet. Clones share the same rows, which lets tests play
/// several writers against one ledger.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<SheetRow>>>,
    reads_fail: Arc<AtomicBool>,
    writes_fail: Arc<AtomicBool>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(rows: Vec<SheetRow>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            ..Self::default()
        }
    }

    /// Makes every following read fail with `StoreUnavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }

    /// Makes every following overwrite fail with `StoreUnavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Appends directly, bypassing any read-modify-write. Simulates an
    /// external editor of the sheet.
    pub async fn push_external(&self, row: SheetRow) {
        self.rows.write().await.push(row);
    }
}

impl LedgerStore for MemoryStore {
    async fn read_rows(&self) -> ResultEngine<Vec<SheetRow>> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(EngineError::StoreUnavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(self.rows.read().await.clone())
    }

    async fn overwrite_rows(&self, rows: &[SheetRow]) -> ResultEngine<()> {
        if self.writes_fail.load(Ordering::SeqCst) {
            return Err(EngineError::StoreUnavailable(
                "memory store rejected the write".to_string(),
            ));
        }
        *self.rows.write().await = rows.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
