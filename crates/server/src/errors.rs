use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error returned by handlers; rendered as `{"error", "code"}` JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Service(e) => match e {
                ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
                ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
                ServiceError::Upload(_)
                | ServiceError::Db(_)
                | ServiceError::Hash(_)
                | ServiceError::Model(ModelError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> u16 {
        match self {
            AppError::Service(e) => e.code(),
            AppError::BadRequest(_) => 1001,
            AppError::PayloadTooLarge { .. } => 1005,
            AppError::Internal(_) => 1300,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %msg, "request failed");
        }
        (status, Json(serde_json::json!({ "error": msg, "code": self.code() }))).into_response()
    }
}
