//! Error types for web handlers.
//!
//! This module defines the error type that bridges seating and service errors
//! to HTTP responses, implementing Axum's `IntoResponse` trait.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seating_core::{ErrorKind, SeatingError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application error type for web handlers.
///
/// Carries the HTTP status, a user-facing message and a stable error code
/// that clients can branch on. Converts into a JSON response body
/// `{"code": ..., "message": ...}`.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Data>, AppError> {
///     let grid = store.fetch(&id).await
///         .map_err(|e| AppError::internal("storage failure").with_source(e.into()))?
///         .ok_or_else(|| AppError::not_found("Cinema", id))?;
///     Ok(Json(grid.into()))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Stable error code of this error
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// User-facing message of this error
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 400 error for a pagination offset outside the result set.
    ///
    /// Shares its status with [`bad_request`](Self::bad_request) but carries
    /// a distinct code so clients can tell the two apart.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "OUT_OF_RANGE".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            message.into(),
            "CONFLICT".to_string(),
        )
    }

    /// Create a 409 error for cancelling a seat that is not reserved.
    #[must_use]
    pub fn not_reserved(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            message.into(),
            "NOT_RESERVED".to_string(),
        )
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code (for client error handling).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        } else {
            tracing::debug!(status = %self.status, code = %self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

/// Map seat grid errors onto HTTP.
///
/// | kind           | status | code           |
/// |----------------|--------|----------------|
/// | `InvalidInput` | 400    | `BAD_REQUEST`  |
/// | `Conflict`     | 409    | `CONFLICT`     |
/// | `NotReserved`  | 409    | `NOT_RESERVED` |
impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::InvalidInput => Self::bad_request(message),
            ErrorKind::Conflict => Self::conflict(message),
            ErrorKind::NotReserved => Self::not_reserved(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seating_core::{Coordinate, InvalidInput};

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Cinema", "123");
        assert_eq!(err.to_string(), "[NOT_FOUND] Cinema with id 123 not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_out_of_range_is_distinct_from_bad_request() {
        let err = AppError::out_of_range("offset out of range");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_seating_error_mapping() {
        let invalid = AppError::from(SeatingError::from(InvalidInput::MalformedGrid));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code(), "BAD_REQUEST");
        assert_eq!(invalid.message(), "invalid input: malformed seats data");

        let conflict = AppError::from(SeatingError::Conflict);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.code(), "CONFLICT");

        let not_reserved = AppError::from(SeatingError::NotReserved(Coordinate::new(0, 1)));
        assert_eq!(not_reserved.status(), StatusCode::CONFLICT);
        assert_eq!(not_reserved.code(), "NOT_RESERVED");
        assert_eq!(not_reserved.message(), "seat (0, 1) is not reserved");
    }

    #[test]
    fn test_internal_keeps_source() {
        use std::error::Error as _;

        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.source().map(ToString::to_string), Some("disk on fire".to_string()));
    }
}
