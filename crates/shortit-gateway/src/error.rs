use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortit_core::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

pub enum AppError {
    /// The requested short code was never issued.
    NotFound,
    /// Missing or malformed query string.
    InvalidQuery(QueryRejection),
    Shortener(ShortenerError),
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::InvalidQuery(value)
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        Self::Shortener(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Short URL not found".to_string()),
            AppError::InvalidQuery(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
            AppError::Shortener(err @ ShortenerError::GenerationExhausted { .. }) => {
                error!(error = %err, "short code generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Shortener(err @ ShortenerError::StorageUnavailable(_)) => {
                error!(error = %err, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
