//! Sheet endpoints: read and overwrite a whole named sheet.

use std::path::PathBuf;

use api_types::sheet::{SheetRows, SheetWritten};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::{CsvStore, LedgerStore};

use crate::{ServerError, server::ServerState};

fn sheet_path(state: &ServerState, name: &str) -> Result<PathBuf, ServerError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ServerError::Generic(format!(
            "invalid sheet name \"{name}\""
        )));
    }
    Ok(state.data_dir.join(format!("{name}.csv")))
}

/// Handle requests for the full content of a sheet
pub async fn read(
    Path(name): Path<String>,
    State(state): State<ServerState>,
) -> Result<Json<SheetRows>, ServerError> {
    let store = CsvStore::new(sheet_path(&state, &name)?);
    let rows = store.read_rows().await?;
    tracing::debug!("served {} rows of sheet {name}", rows.len());
    Ok(Json(SheetRows { rows }))
}

/// Handle requests replacing a sheet
pub async fn overwrite(
    Path(name): Path<String>,
    State(state): State<ServerState>,
    Json(payload): Json<SheetRows>,
) -> Result<Json<SheetWritten>, ServerError> {
    let store = CsvStore::new(sheet_path(&state, &name)?);
    let _guard = state.write_lock.lock().await;
    store.overwrite_rows(&payload.rows).await?;
    tracing::info!("sheet {name} overwritten with {} rows", payload.rows.len());
    Ok(Json(SheetWritten {
        rows_written: payload.rows.len(),
    }))
}
