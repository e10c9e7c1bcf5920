//! Error types for the book form client

use thiserror::Error;

use crate::models::{ApiError, FieldErrors};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Record id is immutable once assigned")]
    ImmutableId,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Backend error: {0}")]
    Api(ApiError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Maps crate errors onto the `{ code, message }` pair the form displays
impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if let AppError::Api(api) = err {
            return api;
        }

        let code = match &err {
            AppError::UnknownField(_) | AppError::ImmutableId | AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Validation(_) => 422,
            AppError::Api(api) => api.code,
            AppError::Decode(_) => 502,
            AppError::Transport(e) => e.status().map(|s| s.as_u16()).unwrap_or(503),
            AppError::Config(_) => {
                tracing::error!("Configuration error: {}", err);
                500
            }
        };

        let message = match err {
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::BadRequest(msg) => msg,
            other => other.to_string(),
        };

        ApiError { code, message }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
