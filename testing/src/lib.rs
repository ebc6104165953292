//! # Seating Testing
//!
//! Testing utilities and helpers for seat grids and the cinema service.
//!
//! This crate provides:
//! - A Given-When-Then harness for grid commands ([`GridTest`])
//! - Fixture builders for grids, coordinates and group names
//! - `proptest` strategies for configurations and coordinates
//!
//! ## Example
//!
//! ```
//! use seating_testing::fixtures::{at, grid, group};
//!
//! let mut cinema = grid(4, 5, 7);
//! cinema.reserve(&[at(0, 0)], group("g")).unwrap();
//! cinema.reserve(&[at(0, 1)], group("g")).unwrap();
//! assert_eq!(cinema.reserved_count(), 2);
//! ```


pub use grid_test::GridTest;

/// Fixture builders for tests.
///
/// These panic on invalid input instead of returning errors, which keeps
/// test bodies short.
pub mod fixtures {
    use seating_core::{Coordinate, GridConfig, GroupName, SeatGrid};

    /// An all-available grid.
    #[must_use]
    pub fn grid(rows: usize, columns: usize, min_distance: usize) -> SeatGrid {
        SeatGrid::new(GridConfig::new(rows, columns, min_distance))
    }

    /// A single coordinate.
    #[must_use]
    pub const fn at(row: usize, column: usize) -> Coordinate {
        Coordinate::new(row, column)
    }

    /// Coordinates from `(row, column)` pairs.
    #[must_use]
    pub fn coords(pairs: &[(usize, usize)]) -> Vec<Coordinate> {
        pairs.iter().copied().map(Coordinate::from).collect()
    }

    /// A group name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn group(name: &str) -> GroupName {
        GroupName::new(name).expect("fixture group names must be non-empty")
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use seating_core::{Coordinate, GridConfig, GroupName};

    /// Usable configs up to `max_extent` in each dimension.
    pub fn usable_config(max_extent: usize) -> impl Strategy<Value = GridConfig> {
        (1..=max_extent, 1..=max_extent, 0..=max_extent * 2)
            .prop_map(|(rows, columns, d)| GridConfig::new(rows, columns, d))
    }

    /// A coordinate inside `config`.
    pub fn coordinate_in(config: GridConfig) -> impl Strategy<Value = Coordinate> {
        (0..config.rows, 0..config.columns).prop_map(|(r, c)| Coordinate::new(r, c))
    }

    /// A coordinate outside `config` in at least one dimension.
    pub fn coordinate_outside(config: GridConfig) -> impl Strategy<Value = Coordinate> {
        prop_oneof![
            (config.rows..config.rows + 10, 0..config.columns + 10)
                .prop_map(|(r, c)| Coordinate::new(r, c)),
            (0..config.rows + 10, config.columns..config.columns + 10)
                .prop_map(|(r, c)| Coordinate::new(r, c)),
        ]
    }

    /// Up to `max_len` coordinates inside `config`.
    pub fn coordinates_in(config: GridConfig, max_len: usize) -> impl Strategy<Value = Vec<Coordinate>> {
        vec(coordinate_in(config), 1..=max_len)
    }

    /// A short, non-empty group name.
    pub fn group_name() -> impl Strategy<Value = GroupName> {
        "[a-z]{1,8}".prop_filter_map("non-empty", |name| GroupName::new(name).ok())
    }
}
