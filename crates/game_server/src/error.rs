//! Error types and handling for the game server.
//!
//! This module defines the error types that can occur during server operations
//! and how each one is reported to HTTP clients.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use point_index::IndexError;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Enumeration of possible server errors.
///
/// Index validation failures and malformed requests are client errors;
/// internal faults are logged and reported without detail.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Error raised by the point index
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Request could not be decoded
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Requested point does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-related errors such as binding failures
    #[error("Network error: {0}")]
    Network(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body sent with every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Index(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ServerError::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Network(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
