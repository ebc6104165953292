//! # Seating Core
//!
//! The seat grid model and the group-distancing reservation rule.
//!
//! This crate is the functional core of the cinema seating service: pure,
//! synchronous, and free of I/O and logging. Callers (the storage and HTTP
//! layers in `cinema-server`) look a grid up, call into it, and persist the
//! result.
//!
//! ## Core Concepts
//!
//! - **Coordinate**: `(row, column)` of one seat
//! - **Distance**: taxicab distance between two coordinates
//! - **Group**: label shared by the seats of one party; a party's seats are
//!   exempt from the distance rule against each other
//! - **Seat Grid**: rows × columns of seats, each available or reserved by a
//!   group, plus the `min_distance` threshold
//!
//! ## Example
//!
//! ```
//! use seating_core::{Coordinate, GridConfig, GroupName, SeatGrid};
//!
//! let mut grid = SeatGrid::new(GridConfig::new(2, 3, 1));
//! grid.reserve(&[Coordinate::new(0, 0)], GroupName::new("smiths")?)?;
//!
//! assert_eq!(grid.render(), "1 0 0\n0 0 0");
//! assert_eq!(grid.list_available().len(), 5);
//! # Ok::<(), seating_core::SeatingError>(())
//! ```

#![forbid(unsafe_code)]

pub mod availability;
pub mod config;
pub mod coordinate;
pub mod distance;
pub mod error;
pub mod grid;
pub mod group;

pub use availability::SeatBlock;
pub use config::GridConfig;
pub use coordinate::Coordinate;
pub use distance::distance;
pub use error::{ErrorKind, InvalidInput, SeatingError};
pub use grid::{GridCommand, GridOutcome, Occupancy, Reconfigured, Seat, SeatGrid};
pub use group::GroupName;
