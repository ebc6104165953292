//! Axum integration for the cinema seating workspace.
//!
//! The seat grid in `seating-core` is pure and synchronous; this crate is the
//! HTTP shell around it:
//!
//! - [`AppError`] maps [`seating_core::SeatingError`] and service failures to
//!   JSON error responses with a stable `code`
//! - [`middleware`] tags every request with a correlation ID
//! - [`handlers`] holds the liveness endpoints
//!
//! # Example
//!
//! ```ignore
//! use seating_web::{correlation_id_layer, handlers, AppError};
//! use axum::{routing::{get, post}, Json, Router};
//!
//! async fn reserve(
//!     State(state): State<AppState>,
//!     Json(request): Json<ReserveRequest>,
//! ) -> Result<Json<ReserveResponse>, AppError> {
//!     state.cinema.reserve_seats(request.id, &request.seats, request.group).await?;
//!     Ok(Json(ReserveResponse { success: true }))
//! }
//!
//! let app = Router::new()
//!     .route("/health", get(handlers::health_check))
//!     .route("/api/v1/cinema/seat/reserve", post(reserve))
//!     .layer(correlation_id_layer())
//!     .with_state(app_state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;

pub use error::{AppError, ErrorResponse};
pub use middleware::{correlation_id_layer, CorrelationId, CorrelationIdExt, CORRELATION_ID_HEADER};
