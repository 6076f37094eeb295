//! HTTP client for the `tripsplit` sheet service.

use api_types::{
    ErrorResponse,
    sheet::{SheetRow, SheetRows, SheetWritten},
};
use engine::{EngineError, LedgerStore, ResultEngine};
use reqwest::{Response, Url};

use crate::error::{AppError, Result};

/// One named sheet on the sheet service, used as the ledger store.
#[derive(Debug, Clone)]
pub struct SheetClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl SheetClient {
    pub fn new(base_url: &str, sheet: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let endpoint = base_url
            .join(&format!("sheets/{sheet}"))
            .map_err(|err| AppError::Terminal(format!("invalid sheet name: {err}")))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport(&self, err: reqwest::Error) -> EngineError {
        EngineError::StoreUnavailable(format!("sheet service unreachable at {}: {err}", self.endpoint))
    }
}

async fn error_for_status(res: Response) -> EngineError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());
    EngineError::StoreUnavailable(format!("sheet service answered {status}: {body}"))
}

impl LedgerStore for SheetClient {
    async fn read_rows(&self) -> ResultEngine<Vec<SheetRow>> {
        let res = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|err| self.transport(err))?;

        if !res.status().is_success() {
            return Err(error_for_status(res).await);
        }
        let payload = res
            .json::<SheetRows>()
            .await
            .map_err(|err| self.transport(err))?;
        Ok(payload.rows)
    }

    async fn overwrite_rows(&self, rows: &[SheetRow]) -> ResultEngine<()> {
        let payload = SheetRows {
            rows: rows.to_vec(),
        };
        let res = self
            .http
            .put(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.transport(err))?;

        if !res.status().is_success() {
            return Err(error_for_status(res).await);
        }
        let written = res
            .json::<SheetWritten>()
            .await
            .map_err(|err| self.transport(err))?;
        if written.rows_written != rows.len() {
            return Err(EngineError::StoreUnavailable(format!(
                "sheet service wrote {} of {} rows",
                written.rows_written,
                rows.len()
            )));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.endpoint.to_string()
    }
}
