//! Router configuration for the cinema server.

use super::health::readiness_check;
use super::state::AppState;
use crate::api::{cinema, seats};
use axum::{
    routing::{get, post, put},
    Router,
};
use seating_web::handlers::{health_check, healthz};
use seating_web::middleware::correlation_id_layer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - Health checks (`/health`, `/healthz`, `/ready`)
/// - Cinema configuration and snapshot endpoints
/// - Seat availability, reservation and cancellation endpoints
///
/// Every request passes through the HTTP trace layer and gets a correlation ID.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Cinema configuration
        .route("/cinema/seat/configure", post(cinema::configure_cinema))
        .route("/cinema/seat/configure/:id", put(cinema::update_cinema_config))
        .route("/cinema/:id", get(cinema::get_cinema))
        // Seats
        .route("/cinema/seat/available", get(seats::get_available_seats))
        .route("/cinema/seat/reserve", post(seats::reserve_seats))
        .route("/cinema/seat/cancel", post(seats::cancel_seats));

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(healthz))
        .route("/ready", get(readiness_check))
        .nest("/api/v1", api_routes)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
