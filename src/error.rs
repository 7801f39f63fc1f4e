use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Reported as 400 to keep the status the booking endpoint has always used.
    #[error("{0}")]
    Conflict(String),

    #[error("{message}: {source}")]
    Storage {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn storage(message: impl Into<String>, source: StoreError) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => json!({ "message": message }),
            AppError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
                json!({ "message": message, "error": source.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
