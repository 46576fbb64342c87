//! WebServer-specific error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("{details}")]
    InvalidRequest { details: String },

    #[error("Error saving order: {message}")]
    StoreWriteFailed { message: String },

    #[error("Error retrieving orders: {message}")]
    StoreReadFailed { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WebServerError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::InvalidRequest { details: details.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn store_write(source: &WebServerError) -> Self {
        Self::StoreWriteFailed { message: source.to_string() }
    }

    pub fn store_read(source: &WebServerError) -> Self {
        Self::StoreReadFailed { message: source.to_string() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            WebServerError::SharedError(SharedError::InvalidDate { .. })
            | WebServerError::SharedError(SharedError::UnknownPizzaType { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            shared::logging::log_error("Request", &self);
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebServerError::invalid_request("Missing date").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebServerError::from(SharedError::InvalidDate { input: "x".into() }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebServerError::StoreReadFailed { message: "disk".into() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WebServerError::from(SharedError::invalid_config("port", 0)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_keep_original_prefixes() {
        let io = WebServerError::from(std::io::Error::other("disk full"));
        assert_eq!(
            WebServerError::store_write(&io).to_string(),
            "Error saving order: I/O error: disk full"
        );
        assert_eq!(
            WebServerError::store_read(&io).to_string(),
            "Error retrieving orders: I/O error: disk full"
        );
    }
}
