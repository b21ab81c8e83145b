//! Error types for the surfsup application.
//!
//! This module defines a single error enum covering every failure the server
//! can surface, together with the HTTP status each one maps to.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// Relational store errors (connection, query, decode)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A date path segment that is not a valid `MMDDYYYY` calendar date
    #[error("Invalid date: {param} - {message}")]
    InvalidDate { param: String, message: String },

    /// The store does not have the expected tables or columns
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// HTTP status code used when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsUpError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
