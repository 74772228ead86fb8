//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use tempus_core::error::{AppError, ErrorKind};

/// Message returned for every failed login or refresh.
pub const AUTHENTICATION_FAILED: &str = "authentication failed";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Reports any credential failure as a uniform 401.
    ///
    /// Unknown users and sessions are folded in as well, so the response
    /// does not reveal which check failed. The original kind is logged.
    pub fn authentication(err: AppError) -> Self {
        match err.kind {
            ErrorKind::NotFound
            | ErrorKind::Unauthorized
            | ErrorKind::InvalidToken
            | ErrorKind::ExpiredToken
            | ErrorKind::InvalidCredentialFormat
            | ErrorKind::ActorNotFound => {
                debug!(kind = %err.kind, reason = %err.message, "Authentication failed");
                Self(AppError::unauthorized(AUTHENTICATION_FAILED))
            }
            _ => Self(err),
        }
    }

    /// The HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind)
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCredentialFormat
        | ErrorKind::InvalidToken
        | ErrorKind::ExpiredToken
        | ErrorKind::Unauthorized
        | ErrorKind::ActorNotFound => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;

        let message = if status.is_server_error() {
            error!(kind = %err.kind, error = %err, source = ?err.source, "Internal server error");
            "internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
