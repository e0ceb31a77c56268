/// Error types for twitter-service
///
/// Errors are converted to flat JSON bodies `{"error": ..., "status": ...}`.
/// Store failures never leak their cause to the client; it is logged instead.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for twitter-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, please try again later!";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Store query or connection failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referenced entity does not exist
    #[error("{0}")]
    ValidationError(String),

    /// Request body could not be read
    #[error("{0}")]
    BadRequest(String),

    /// A list endpoint matched no rows
    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}
