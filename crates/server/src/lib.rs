use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::ErrorResponse;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod server;
mod sheets;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::RefreshTooSoon { .. } => StatusCode::TOO_MANY_REQUESTS,
        EngineError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::StoreUnavailable(reason) => {
            tracing::error!("sheet storage error: {reason}");
            "sheet storage unavailable".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_unavailable_maps_to_503() {
        let res = ServerError::from(EngineError::StoreUnavailable("disk".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn refresh_too_soon_maps_to_429() {
        let res = ServerError::from(EngineError::RefreshTooSoon { wait_secs: 3 }).into_response();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn invalid_config_maps_to_500() {
        let res = ServerError::from(EngineError::InvalidConfig("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
