//! Grid configuration.

use serde::{Deserialize, Serialize};

/// Extents and distancing threshold of a seat grid.
///
/// Two seats are too close when their taxicab distance is `<= min_distance`.
/// A config with zero rows or zero columns describes an empty grid on which
/// every coordinate is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Distance at or below which seats of different groups conflict
    pub min_distance: usize,
}

impl GridConfig {
    /// Creates a new `GridConfig`
    #[must_use]
    pub const fn new(rows: usize, columns: usize, min_distance: usize) -> Self {
        Self {
            rows,
            columns,
            min_distance,
        }
    }

    /// Build a config from signed transport integers.
    ///
    /// Negative extents become zero (an empty, unusable grid). A negative
    /// distance becomes zero, which is equivalent: distance zero only ever
    /// pairs a seat with itself, and an occupied seat is already refused.
    #[must_use]
    pub fn from_signed(rows: i64, columns: i64, min_distance: i64) -> Self {
        Self::new(
            usize::try_from(rows).unwrap_or(0),
            usize::try_from(columns).unwrap_or(0),
            usize::try_from(min_distance).unwrap_or(0),
        )
    }

    /// Total number of seats, saturating on overflow.
    #[must_use]
    pub const fn seat_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Whether the grid has at least one seat.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.rows > 0 && self.columns > 0
    }

    /// Whether `other` has the same rows and columns.
    #[must_use]
    pub const fn same_extents(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_clamps_negatives() {
        assert_eq!(GridConfig::from_signed(-1, 5, -3), GridConfig::new(0, 5, 0));
        assert_eq!(GridConfig::from_signed(4, 5, 7), GridConfig::new(4, 5, 7));
    }

    #[test]
    fn test_usable() {
        assert!(GridConfig::new(1, 1, 0).is_usable());
        assert!(!GridConfig::new(0, 5, 0).is_usable());
        assert!(!GridConfig::new(5, 0, 0).is_usable());
    }

    #[test]
    fn test_same_extents_ignores_distance() {
        let a = GridConfig::new(4, 5, 7);
        assert!(a.same_extents(&GridConfig::new(4, 5, 1)));
        assert!(!a.same_extents(&GridConfig::new(5, 4, 7)));
    }

    #[test]
    fn test_seat_count_saturates() {
        assert_eq!(GridConfig::new(4, 5, 0).seat_count(), 20);
        assert_eq!(GridConfig::new(usize::MAX, 2, 0).seat_count(), usize::MAX);
    }
}
