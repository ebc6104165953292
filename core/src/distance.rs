//! Taxicab distance between seats.

use crate::coordinate::Coordinate;

/// Manhattan distance: `|a.row - b.row| + |a.column - b.column|`.
///
/// Symmetric, and zero only when `a == b`.
#[must_use]
pub const fn distance(a: Coordinate, b: Coordinate) -> usize {
    a.row.abs_diff(b.row) + a.column.abs_diff(b.column)
}
