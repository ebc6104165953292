//! Cinema configuration endpoints.
//!
//! - POST /api/v1/cinema/seat/configure - Create a cinema
//! - PUT /api/v1/cinema/seat/configure/:id - Reconfigure a cinema
//! - GET /api/v1/cinema/:id - Snapshot of a cinema

use super::parse_id;
use crate::server::state::AppState;
use crate::service::GridSnapshot;
use crate::storage::GridId;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use seating_core::GridConfig;
use seating_web::AppError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Extents and distance as they arrive on the wire.
///
/// Missing fields default to zero. Negative extents yield an empty grid on
/// which every seat operation is rejected; a negative distance is zero.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ConfigureRequest {
    /// Number of rows
    #[serde(default)]
    pub rows: i64,
    /// Number of columns
    #[serde(default)]
    pub columns: i64,
    /// Distance at or below which seats of different groups conflict
    #[serde(default)]
    pub min_distance: i64,
}

impl From<ConfigureRequest> for GridConfig {
    fn from(request: ConfigureRequest) -> Self {
        Self::from_signed(request.rows, request.columns, request.min_distance)
    }
}

/// Response for a created cinema.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigureResponse {
    /// New cinema id
    pub id: GridId,
}

/// Response for a reconfiguration.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateConfigResponse {
    /// Always `true`
    pub success: bool,
    /// Whether the layout was rebuilt, discarding every reservation
    pub reset: bool,
    /// Reservations discarded by the rebuild
    pub discarded: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a cinema.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/cinema/seat/configure \
///   -H 'Content-Type: application/json' \
///   -d '{"rows":4,"columns":5,"min_distance":7}'
/// # 201 {"id":"550e8400-e29b-41d4-a716-446655440000"}
/// ```
pub async fn configure_cinema(
    State(state): State<AppState>,
    Json(request): Json<ConfigureRequest>,
) -> Result<(StatusCode, Json<ConfigureResponse>), AppError> {
    let id = state.cinema.configure_cinema(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ConfigureResponse { id })))
}

/// Reconfigure a cinema.
///
/// Keeping rows and columns keeps every reservation; changing either resets
/// the grid and the response says so.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:8080/api/v1/cinema/seat/configure/550e8400-e29b-41d4-a716-446655440000 \
///   -H 'Content-Type: application/json' \
///   -d '{"rows":4,"columns":6,"min_distance":7}'
/// # {"success":true,"reset":true,"discarded":2}
/// ```
pub async fn update_cinema_config(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<UpdateConfigResponse>, AppError> {
    let id = parse_id(&id)?;
    let outcome = state.cinema.update_config(id, request.into()).await?;

    Ok(Json(UpdateConfigResponse {
        success: true,
        reset: outcome.reset,
        discarded: outcome.discarded,
    }))
}

/// Snapshot of a cinema: configuration, rendered layout and reservations by
/// group.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/api/v1/cinema/550e8400-e29b-41d4-a716-446655440000
/// ```
///
/// Response:
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "rows": 2,
///   "columns": 3,
///   "min_distance": 1,
///   "grid": "1 0 0\n0 0 0",
///   "available": 5,
///   "groups": [{"group": "smiths", "seats": [{"row": 0, "column": 0}]}]
/// }
/// ```
pub async fn get_cinema(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GridSnapshot>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.cinema.grid_snapshot(id).await?))
}
