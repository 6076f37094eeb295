use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use api_types::{SHEET_COLUMNS, sheet::SheetRow};

use crate::{EngineError, ResultEngine, store::LedgerStore};

/// Ledger kept in a CSV file with the sheet columns as header.
///
/// Overwrites go through a temporary file renamed over the original, so a
/// reader never sees a half written sheet.
#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, action: &str, err: impl std::fmt::Display) -> EngineError {
        EngineError::StoreUnavailable(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

/// Decodes CSV bytes; a missing header yields no rows.
pub(crate) fn decode_rows(bytes: &[u8]) -> Result<Vec<SheetRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    reader.deserialize::<SheetRow>().collect()
}

pub(crate) fn encode_rows(rows: &[SheetRow]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SHEET_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

impl LedgerStore for CsvStore {
    async fn read_rows(&self) -> ResultEngine<Vec<SheetRow>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.unavailable("read", err)),
        };
        decode_rows(&bytes).map_err(|err| self.unavailable("parse", err))
    }

    async fn overwrite_rows(&self, rows: &[SheetRow]) -> ResultEngine<()> {
        let payload = encode_rows(rows).map_err(|err| self.unavailable("encode", err))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.unavailable("create directory for", err))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, payload)
            .await
            .map_err(|err| self.unavailable("write", err))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| self.unavailable("replace", err))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_header_even_without_rows() {
        let bytes = encode_rows(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Date,Item,Amount,Currency,Payer,Involved\n"
        );
    }

    #[test]
    fn decodes_short_rows_and_blank_cells() {
        let csv = "Date,Item,Amount,Currency,Payer,Involved\n\
                   2026-01-02,Taxi,1500,JPY,Bill,\"Christen, Bill\"\n\
                   2026-01-03,Snack,,TWD\n";
        let rows = decode_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].involved.as_deref(), Some("Christen, Bill"));
        assert_eq!(rows[1].amount, None);
        assert_eq!(rows[1].payer, None);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(decode_rows(b"").unwrap().is_empty());
    }
}
