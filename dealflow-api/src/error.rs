//! Error types for dealflow-api
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Handlers map these to HTTP status codes at the boundary.

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for dealflow-api
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status code for this error at the handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<dealflow_common::Error> for Error {
    fn from(e: dealflow_common::Error) -> Self {
        match e {
            dealflow_common::Error::Database(inner) => Error::Database(inner),
            dealflow_common::Error::Io(inner) => Error::Io(inner),
            dealflow_common::Error::Config(msg) => Error::Config(msg),
            dealflow_common::Error::NotFound(msg) => Error::NotFound(msg),
            dealflow_common::Error::InvalidInput(msg) => Error::BadRequest(msg),
            dealflow_common::Error::Internal(msg) => Error::Internal(msg),
        }
    }
}

/// Convenience Result type using dealflow-api Error
pub type Result<T> = std::result::Result<T, Error>;
