use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    UnprocessableDocument(String),

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("{0}")]
    EvaluationFailure(String),

    #[error("An unexpected error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::UnprocessableDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExtractionFailed(_)
            | AppError::EvaluationFailure(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::UnprocessableDocument(_) => "UNPROCESSABLE_DOCUMENT",
            AppError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AppError::EvaluationFailure(_) => "EVALUATION_FAILURE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            e if status.is_server_error() => tracing::error!(code = e.code(), "{e}"),
            e => tracing::debug!(code = e.code(), "Rejected request: {e}"),
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Response for a request whose handler panicked. Installed on the router
/// through `CatchPanicLayer`, so the client still gets the JSON envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());
    AppError::Internal(anyhow::anyhow!("request handler panicked: {message}")).into_response()
}
