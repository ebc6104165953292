//! HTTP API for the cinema service.
//!
//! - [`cinema`]: configure, reconfigure and inspect a cinema
//! - [`seats`]: list, reserve and cancel seats
//!
//! Transport integers are signed 64-bit; conversion into grid types happens
//! here, before the service is called.

pub mod cinema;
pub mod seats;

use crate::service::ServiceError;
use crate::storage::{GridId, StoreError};
use seating_web::AppError;
use serde::{Deserialize, Serialize};

/// Generic success acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    /// Always `true`; failures are reported as errors
    pub success: bool,
}

impl SuccessResponse {
    /// An acknowledgement
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Parse a cinema id from the transport.
///
/// # Errors
///
/// Returns a 400 [`AppError`] if `raw` is not a UUID.
pub fn parse_id(raw: &str) -> Result<GridId, AppError> {
    raw.parse::<GridId>()
        .map_err(|e| AppError::from(ServiceError::from(e)))
}

/// Map service errors onto HTTP.
///
/// | error                      | status | code               |
/// |----------------------------|--------|--------------------|
/// | `Seating(..)`              | 400/409 | by seating error kind |
/// | `StoreError::InvalidId`    | 400    | `BAD_REQUEST`      |
/// | `StoreError::NotFound`     | 404    | `NOT_FOUND`        |
/// | `OffsetOutOfRange`         | 400    | `OUT_OF_RANGE`     |
/// | `GridTooLarge`             | 422    | `VALIDATION_ERROR` |
/// | other store errors         | 500    | `INTERNAL_SERVER_ERROR` |
impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Seating(err) => Self::from(err),
            ServiceError::Store(StoreError::InvalidId(raw)) => {
                Self::bad_request(format!("invalid cinema id: {raw:?}"))
            }
            ServiceError::Store(StoreError::NotFound(id)) => Self::not_found("Cinema", id),
            ServiceError::OffsetOutOfRange { .. } => Self::out_of_range(err.to_string()),
            ServiceError::GridTooLarge { .. } => Self::validation(err.to_string()),
            ServiceError::Store(store) => {
                Self::internal("An internal error occurred").with_source(anyhow::Error::new(store))
            }
        }
    }
}
