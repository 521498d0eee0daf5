//! Error types for the settings store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Settings Error Enum ==
/// Unified error type for the settings store and its HTTP surface.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Setting fields failed the column/format check
    #[error("Invalid setting format: {0}")]
    InvalidFormat(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No value resolved for the key
    #[error("Setting not found: {0}")]
    NotFound(String),

    /// Repository adapter failure
    #[error("Repository error: {0}")]
    Repository(String),

    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        let status = match &self {
            SettingsError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            SettingsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SettingsError::NotFound(_) => StatusCode::NOT_FOUND,
            SettingsError::Repository(_)
            | SettingsError::Database(_)
            | SettingsError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the settings store.
pub type Result<T> = std::result::Result<T, SettingsError>;
