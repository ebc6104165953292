//! Seat coordinates.
//!
//! A [`Coordinate`] names one seat by `(row, column)`. It carries no bounds of
//! its own: every operation on a [`SeatGrid`](crate::grid::SeatGrid) checks
//! coordinates against the grid's current extents before touching any seat.

use crate::distance::distance;
use crate::error::InvalidInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, column)` pair identifying one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Zero-based row index
    pub row: usize,
    /// Zero-based column index
    pub column: usize,
}

impl Coordinate {
    /// Creates a new `Coordinate`
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Taxicab distance to `other`.
    #[must_use]
    pub const fn distance_to(self, other: Self) -> usize {
        distance(self, other)
    }

    /// Build a coordinate from signed transport integers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NegativeCoordinate`] if either component is
    /// negative.
    pub fn from_signed(row: i64, column: i64) -> Result<Self, InvalidInput> {
        match (usize::try_from(row), usize::try_from(column)) {
            (Ok(r), Ok(c)) => Ok(Self::new(r, c)),
            _ => Err(InvalidInput::NegativeCoordinate { row, column }),
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Decode a raw `[row, column]` pair as it arrives from a transport.
///
/// Anything that is not exactly two entries is rejected with
/// [`InvalidInput::CoordinateShape`]; negative entries can never be in bounds
/// and are rejected with [`InvalidInput::NegativeCoordinate`].
impl TryFrom<&[i64]> for Coordinate {
    type Error = InvalidInput;

    fn try_from(raw: &[i64]) -> Result<Self, Self::Error> {
        let &[row, column] = raw else {
            return Err(InvalidInput::CoordinateShape { len: raw.len() });
        };
        Self::from_signed(row, column)
    }
}
