//! Client error types

use seating_engine::StoreError;
use shared::error::{AppError, ErrorCategory, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error envelope returned by the backend
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => StoreError::Network(e.to_string()),
            ClientError::Unauthorized => StoreError::Unauthorized,
            ClientError::NotFound(msg) => StoreError::NotFound(msg),
            ClientError::Forbidden(msg) | ClientError::Validation(msg) => StoreError::Rejected(msg),
            ClientError::Api(app) => match app.code {
                ErrorCode::NotAuthenticated | ErrorCode::SessionExpired => StoreError::Unauthorized,
                ErrorCode::NotFound | ErrorCode::TableNotFound | ErrorCode::GuestNotFound => {
                    StoreError::NotFound(app.message)
                }
                code if ErrorCategory::from_code(code.code()) == ErrorCategory::System => {
                    StoreError::Unavailable(app.message)
                }
                _ => StoreError::Rejected(app.message),
            },
            ClientError::InvalidResponse(msg) | ClientError::Internal(msg) => {
                StoreError::Unavailable(msg)
            }
            ClientError::Serialization(e) => StoreError::Unavailable(e.to_string()),
        }
    }
}
