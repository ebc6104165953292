//! Readiness endpoint for the cinema server.
//!
//! Liveness lives in `seating_web::handlers`; readiness additionally asks the
//! grid store whether it still answers.

use super::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Grid store reachable
    pub store: bool,
    /// Configured cinemas, when the store answered
    pub cinemas: Option<usize>,
}

/// Readiness check endpoint.
///
/// Returns 200 OK if the grid store answers and 503 otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/ready
/// # {"ready":true,"store":true,"cinemas":3}
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    match state.cinema.cinema_count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                store: true,
                cinemas: Some(count),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    store: false,
                    cinemas: None,
                }),
            )
        }
    }
}
