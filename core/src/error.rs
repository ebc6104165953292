//! Error types for seat grid operations.
//!
//! Every failure is detected before a grid is mutated, so an `Err` from any
//! operation means the grid is exactly as it was before the call.

use crate::coordinate::Coordinate;
use thiserror::Error;

/// Errors produced by [`SeatGrid`](crate::grid::SeatGrid) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatingError {
    /// Malformed grid, malformed coordinate or out-of-bounds coordinate
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The group cannot be seated under the current occupancy and distance rule
    #[error("seats are not available right now")]
    Conflict,

    /// A cancellation target is not currently reserved
    #[error("seat {0} is not reserved")]
    NotReserved(Coordinate),
}

/// Reasons a request is rejected before any grid state is inspected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The grid has zero rows or zero columns
    #[error("malformed seats data")]
    MalformedGrid,

    /// A raw coordinate did not have exactly two components
    #[error("seat coordinates must be of length 2, got {len}")]
    CoordinateShape {
        /// Number of components received
        len: usize,
    },

    /// A raw coordinate had a negative component
    #[error("seat coordinates must be non-negative, got ({row}, {column})")]
    NegativeCoordinate {
        /// Row as received
        row: i64,
        /// Column as received
        column: i64,
    },

    /// Row index outside `[0, rows)`
    #[error("seat row {row} must be in range [0, {rows})")]
    RowOutOfRange {
        /// Offending row
        row: usize,
        /// Current row count
        rows: usize,
    },

    /// Column index outside `[0, columns)`
    #[error("seat column {column} must be in range [0, {columns})")]
    ColumnOutOfRange {
        /// Offending column
        column: usize,
        /// Current column count
        columns: usize,
    },

    /// `rows * columns` seats cannot be allocated
    #[error("a {rows}x{columns} grid is too large to allocate")]
    GridTooLarge {
        /// Requested rows
        rows: usize,
        /// Requested columns
        columns: usize,
    },

    /// Group names must be non-empty
    #[error("group name must not be empty")]
    EmptyGroupName,
}

/// Coarse classification of a [`SeatingError`], for mapping onto transport
/// status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`SeatingError::InvalidInput`]
    InvalidInput,
    /// See [`SeatingError::Conflict`]
    Conflict,
    /// See [`SeatingError::NotReserved`]
    NotReserved,
}

impl SeatingError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Conflict => ErrorKind::Conflict,
            Self::NotReserved(_) => ErrorKind::NotReserved,
        }
    }
}

/// Result alias for seat grid operations.
pub type Result<T> = std::result::Result<T, SeatingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SeatingError::Conflict.to_string(),
            "seats are not available right now"
        );
        assert_eq!(
            SeatingError::NotReserved(Coordinate::new(1, 2)).to_string(),
            "seat (1, 2) is not reserved"
        );
        assert_eq!(
            SeatingError::from(InvalidInput::RowOutOfRange { row: 4, rows: 4 }).to_string(),
            "invalid input: seat row 4 must be in range [0, 4)"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            SeatingError::from(InvalidInput::MalformedGrid).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(SeatingError::Conflict.kind(), ErrorKind::Conflict);
        assert_eq!(
            SeatingError::NotReserved(Coordinate::new(0, 0)).kind(),
            ErrorKind::NotReserved
        );
    }
}
