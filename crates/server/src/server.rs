use axum::{Router, routing::get};

use std::{path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use crate::sheets;

#[derive(Clone)]
pub struct ServerState {
    /// Directory holding one `<sheet>.csv` file per sheet.
    pub data_dir: Arc<PathBuf>,
    /// Serializes overwrites coming through this process.
    pub write_lock: Arc<Mutex<()>>,
}

impl ServerState {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Arc::new(data_dir.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/sheets/{name}", get(sheets::read).put(sheets::overwrite))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(
        "Sheet service listening on {} (data in {})",
        addr,
        state.data_dir.display()
    );

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_state() -> ServerState {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_sheets")
            .join(format!("server_{}", Uuid::new_v4()));
        ServerState::new(dir)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(request).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_sheet(name: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/sheets/{name}"))
            .body(Body::empty())
            .unwrap()
    }

    fn put_sheet(name: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(format!("/sheets/{name}"))
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_sheet_reads_empty() {
        let app = router(test_state());
        let (status, body) = send(app, get_sheet("tokyo")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "rows": [] }));
    }

    #[tokio::test]
    async fn overwrite_then_read_returns_rows_in_order() {
        let state = test_state();
        let rows = json!({ "rows": [
            { "Date": "2026-01-02", "Item": "Taxi", "Amount": "1500", "Currency": "JPY",
              "Payer": "Bill", "Involved": "Christen, Bill" },
            { "Date": "2026-01-03", "Item": "Tea", "Amount": 120, "Currency": "TWD",
              "Payer": "Christen", "Involved": "Christen" }
        ]});

        let (status, body) = send(router(state.clone()), put_sheet("tokyo", rows)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "rows_written": 2 }));

        let (status, body) = send(router(state.clone()), get_sheet("tokyo")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][0]["Item"], "Taxi");
        assert_eq!(body["rows"][1]["Amount"], "120");
        assert_eq!(body["rows"][1]["Involved"], "Christen");

        std::fs::remove_dir_all(state.data_dir.as_path()).ok();
    }

    #[tokio::test]
    async fn rejects_sheet_names_with_path_characters() {
        let app = router(test_state());
        let (status, body) = send(app, get_sheet("..%2Fsecrets")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("sheet name"));
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = router(test_state());
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
