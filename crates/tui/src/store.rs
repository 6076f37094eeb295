use api_types::sheet::SheetRow;
use engine::{CsvStore, LedgerStore, ResultEngine};

use crate::{client::SheetClient, config::StoreConfig, error::Result};

/// The ledger store picked by the configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    Sheet(SheetClient),
    Csv(CsvStore),
}

impl Backend {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(match config {
            StoreConfig::Sheet { base_url, sheet } => Self::Sheet(SheetClient::new(base_url, sheet)?),
            StoreConfig::Csv { path } => Self::Csv(CsvStore::new(path)),
        })
    }
}

impl LedgerStore for Backend {
    async fn read_rows(&self) -> ResultEngine<Vec<SheetRow>> {
        match self {
            Self::Sheet(client) => client.read_rows().await,
            Self::Csv(store) => store.read_rows().await,
        }
    }

    async fn overwrite_rows(&self, rows: &[SheetRow]) -> ResultEngine<()> {
        match self {
            Self::Sheet(client) => client.overwrite_rows(rows).await,
            Self::Csv(store) => store.overwrite_rows(rows).await,
        }
    }

    fn location(&self) -> String {
        match self {
            Self::Sheet(client) => client.location(),
            Self::Csv(store) => store.location(),
        }
    }
}
