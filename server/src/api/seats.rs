//! Seat endpoints.
//!
//! - GET /api/v1/cinema/seat/available - One block of seats open to a new party
//! - POST /api/v1/cinema/seat/reserve - Reserve seats for a group
//! - POST /api/v1/cinema/seat/cancel - Release seats

use super::{parse_id, SuccessResponse};
use crate::server::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use seating_core::{Coordinate, GroupName, InvalidInput, SeatingError};
use seating_web::AppError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// A seat coordinate as it arrives on the wire.
///
/// Accepted as `{"row": r, "column": c}` or as a bare `[r, c]` pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawSeat {
    /// Named fields
    Object {
        /// Row index
        row: i64,
        /// Column index
        column: i64,
    },
    /// Bare pair; anything but two entries is rejected
    Pair(Vec<i64>),
}

impl TryFrom<&RawSeat> for Coordinate {
    type Error = InvalidInput;

    fn try_from(raw: &RawSeat) -> Result<Self, Self::Error> {
        match raw {
            RawSeat::Object { row, column } => Self::from_signed(*row, *column),
            RawSeat::Pair(pair) => Self::try_from(pair.as_slice()),
        }
    }
}

/// Decode every seat or fail on the first bad one.
fn coordinates(raw: &[RawSeat]) -> Result<Vec<Coordinate>, AppError> {
    raw.iter()
        .map(Coordinate::try_from)
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::from(SeatingError::from(e)))
}

/// Query string of the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailableSeatsQuery {
    /// Cinema id
    pub id: String,
    /// Index of the block to return
    #[serde(default)]
    pub set_offset: i64,
}

/// One block of available seats.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailableSeatsResponse {
    /// Seats of the selected block
    pub available_seats: Vec<Coordinate>,
    /// Rendered occupancy of the whole grid
    pub grid: String,
    /// Number of blocks to page through
    pub total_sets: usize,
}

/// Request to reserve seats.
#[derive(Debug, Deserialize)]
pub struct ReserveSeatsRequest {
    /// Cinema id
    pub id: String,
    /// Seats to reserve
    #[serde(default)]
    pub seat_coords: Vec<RawSeat>,
    /// Reserving group
    #[serde(default)]
    pub group_name: String,
}

/// Request to cancel seats.
#[derive(Debug, Deserialize)]
pub struct CancelSeatsRequest {
    /// Cinema id
    pub id: String,
    /// Seats to release
    #[serde(default)]
    pub seat_coords: Vec<RawSeat>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get one block of seats a new party could book.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:8080/api/v1/cinema/seat/available?id=550e8400-e29b-41d4-a716-446655440000&set_offset=0'
/// ```
///
/// Response:
/// ```json
/// {
///   "available_seats": [{"row": 1, "column": 3}, {"row": 1, "column": 4}],
///   "grid": "1 0 0 0 0\n0 0 0 0 0",
///   "total_sets": 2
/// }
/// ```
pub async fn get_available_seats(
    State(state): State<AppState>,
    Query(query): Query<AvailableSeatsQuery>,
) -> Result<Json<AvailableSeatsResponse>, AppError> {
    let id = parse_id(&query.id)?;
    let page = state.cinema.available_seats(id, query.set_offset).await?;

    Ok(Json(AvailableSeatsResponse {
        available_seats: page.seats,
        grid: page.grid,
        total_sets: page.total_sets,
    }))
}

/// Reserve seats for a group, all or nothing.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/cinema/seat/reserve \
///   -H 'Content-Type: application/json' \
///   -d '{"id":"550e8400-e29b-41d4-a716-446655440000","seat_coords":[{"row":0,"column":0}],"group_name":"smiths"}'
/// # {"success":true}
/// ```
pub async fn reserve_seats(
    State(state): State<AppState>,
    Json(request): Json<ReserveSeatsRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = parse_id(&request.id)?;
    let seats = coordinates(&request.seat_coords)?;
    let group = GroupName::new(request.group_name).map_err(SeatingError::from)?;

    state.cinema.reserve_seats(id, &seats, group).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Release seats, all or nothing.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/cinema/seat/cancel \
///   -H 'Content-Type: application/json' \
///   -d '{"id":"550e8400-e29b-41d4-a716-446655440000","seat_coords":[[0,0]]}'
/// # {"success":true}
/// ```
pub async fn cancel_seats(
    State(state): State<AppState>,
    Json(request): Json<CancelSeatsRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = parse_id(&request.id)?;
    let seats = coordinates(&request.seat_coords)?;

    state.cinema.cancel_seats(id, &seats).await?;
    Ok(Json(SuccessResponse::ok()))
}
