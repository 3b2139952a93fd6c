//! Typed errors and HTTP mapping.

use crate::response::failure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message used whenever a required request field is absent or falsy.
pub const DATA_MISSING: &str = "data is missing";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing required field or malformed identifier.
    #[error("validation: {0}")]
    Validation(String),
    /// Unique field already present in the collection.
    #[error("duplicate: {0}")]
    Duplicate(String),
    #[error("not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store: {0}")]
    Store(String),
}

impl AppError {
    pub fn data_missing() -> Self {
        AppError::Validation(DATA_MISSING.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Duplicate(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(m) | AppError::Duplicate(m) | AppError::BadRequest(m) => {
                tracing::warn!(status = status.as_u16(), "request rejected: {}", m);
                m.clone()
            }
            AppError::NotFound | AppError::MethodNotAllowed | AppError::PayloadTooLarge => crate::response::reason_phrase(status).to_string(),
            AppError::Db(_) | AppError::Store(_) => {
                // Detail stays in the logs, the client only sees the reason phrase.
                tracing::error!(error = %self, "request failed");
                crate::response::reason_phrase(status).to_string()
            }
        };
        failure(status, message).into_response()
    }
}
