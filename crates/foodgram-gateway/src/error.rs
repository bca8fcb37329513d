use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use foodgram_core::StorageError;
use foodgram_shortlink::ShortLinkError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("recipe {0} not found")]
    RecipeNotFound(u64),
    #[error("short link not found")]
    ShortLinkNotFound,
    #[error("short link service failed: {0}")]
    ShortLink(#[source] ShortLinkError),
    #[error("storage operation failed: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

impl From<ShortLinkError> for AppError {
    fn from(error: ShortLinkError) -> Self {
        match error {
            ShortLinkError::RecipeNotFound(id) => AppError::RecipeNotFound(id),
            other => AppError::ShortLink(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RecipeNotFound(_) | AppError::ShortLinkNotFound => StatusCode::NOT_FOUND,
            AppError::ShortLink(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { errors: message })).into_response()
    }
}
