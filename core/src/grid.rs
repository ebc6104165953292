//! The seat grid and its reservation rules.
//!
//! # Distancing rule
//!
//! A candidate set of seats may be reserved as group `g` when:
//!
//! 1. every candidate is in bounds and currently available, and
//! 2. no seat already reserved by a group other than `g` lies within
//!    `min_distance` (taxicab) of any candidate.
//!
//! Seats already held by `g` itself never block `g`, and candidates are not
//! checked against each other. A party may therefore sit together, and may
//! grow by reserving more seats under the same name later.
//!
//! # Atomicity
//!
//! [`SeatGrid::reserve`] and [`SeatGrid::cancel`] validate and check every
//! coordinate before changing any seat. Either all targets change or none do.
//!
//! # Example
//!
//! ```
//! use seating_core::{Coordinate, GridConfig, GroupName, SeatGrid, SeatingError};
//!
//! let mut grid = SeatGrid::new(GridConfig::new(4, 5, 7));
//! let smiths = GroupName::new("smiths")?;
//! let jones = GroupName::new("jones")?;
//!
//! grid.reserve(&[Coordinate::new(0, 0)], smiths.clone())?;
//! grid.reserve(&[Coordinate::new(0, 1)], smiths)?;
//!
//! // (3, 4) is exactly 7 seats from (0, 0): too close for another group.
//! let err = grid.reserve(&[Coordinate::new(3, 4)], jones).unwrap_err();
//! assert_eq!(err, SeatingError::Conflict);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::GridConfig;
use crate::coordinate::Coordinate;
use crate::distance::distance;
use crate::error::{InvalidInput, Result, SeatingError};
use crate::group::GroupName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary occupancy of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    /// Free to be reserved
    Available,
    /// Held by a group
    Reserved,
}

impl Occupancy {
    /// Numeric code used by [`SeatGrid::render`].
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Reserved => 1,
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One cell of the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "occupancy", rename_all = "snake_case")]
pub enum Seat {
    /// Free, with no group
    #[default]
    Available,
    /// Held by `group`
    Reserved {
        /// Owning group
        group: GroupName,
    },
}

impl Seat {
    /// Occupancy of this seat
    #[must_use]
    pub const fn occupancy(&self) -> Occupancy {
        match self {
            Self::Available => Occupancy::Available,
            Self::Reserved { .. } => Occupancy::Reserved,
        }
    }

    /// Owning group, if reserved
    #[must_use]
    pub const fn group(&self) -> Option<&GroupName> {
        match self {
            Self::Available => None,
            Self::Reserved { group } => Some(group),
        }
    }

    /// Owning group name, or `""` when available
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group().map_or("", GroupName::as_str)
    }

    /// Whether the seat is reserved
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved { .. })
    }
}

/// Result of [`SeatGrid::configure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconfigured {
    /// Extents unchanged; reservations kept, only `min_distance` updated
    Preserved,
    /// Extents changed; the grid was rebuilt and every reservation discarded
    Reset {
        /// Number of reserved seats that were discarded
        discarded: usize,
    },
}

/// A mutation of a [`SeatGrid`], applied with [`SeatGrid::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridCommand {
    /// (Re)configure extents and distance
    Configure(GridConfig),
    /// Reserve `seats` for `group`
    Reserve {
        /// Target seats
        seats: Vec<Coordinate>,
        /// Reserving group
        group: GroupName,
    },
    /// Cancel the reservation of `seats`
    Cancel {
        /// Target seats
        seats: Vec<Coordinate>,
    },
}

/// What a successfully applied [`GridCommand`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridOutcome {
    /// The grid was configured
    Configured(Reconfigured),
    /// `count` seats were reserved
    Reserved {
        /// Number of seats targeted
        count: usize,
    },
    /// `count` seats were released
    Cancelled {
        /// Number of seats targeted
        count: usize,
    },
}

/// A rectangular cinema seating grid.
///
/// Seats are stored row-major; `seats.len() == rows * columns` always holds.
/// `Clone` is a deep copy: mutating a clone never affects the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    config: GridConfig,
    seats: Vec<Seat>,
}

impl SeatGrid {
    /// Creates a grid with every seat available.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` seats cannot be allocated. Use
    /// [`try_new`](Self::try_new) for extents that are not already bounded.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            seats: vec![Seat::Available; config.seat_count()],
        }
    }

    /// Creates a grid with every seat available, or fails if it cannot be
    /// allocated.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::GridTooLarge`] if `rows * columns` overflows
    /// or the allocation is refused.
    pub fn try_new(config: GridConfig) -> Result<Self> {
        let too_large = || InvalidInput::GridTooLarge {
            rows: config.rows,
            columns: config.columns,
        };
        let count = config.rows.checked_mul(config.columns).ok_or_else(too_large)?;

        let mut seats = Vec::new();
        seats.try_reserve_exact(count).map_err(|_| too_large())?;
        seats.resize(count, Seat::Available);
        Ok(Self { config, seats })
    }

    /// Reconfigure the grid.
    ///
    /// If rows or columns differ from the current extents the grid is rebuilt
    /// at the new size and **every reservation is discarded**. Otherwise the
    /// seats are kept as they are. `min_distance` is updated in both cases;
    /// existing reservations are not re-checked against a new distance.
    ///
    /// # Panics
    ///
    /// Same as [`new`](Self::new) when the grid is rebuilt.
    pub fn configure(&mut self, config: GridConfig) -> Reconfigured {
        if self.config.same_extents(&config) {
            self.config = config;
            return Reconfigured::Preserved;
        }

        let discarded = self.reserved_count();
        *self = Self::new(config);
        Reconfigured::Reset { discarded }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> GridConfig {
        self.config
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.config.rows
    }

    /// Number of columns
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.config.columns
    }

    /// Distance threshold
    #[must_use]
    pub const fn min_distance(&self) -> usize {
        self.config.min_distance
    }

    /// The seat at `coordinate`, or `None` if out of bounds.
    #[must_use]
    pub fn seat(&self, coordinate: Coordinate) -> Option<&Seat> {
        self.contains(coordinate)
            .then(|| &self.seats[self.index(coordinate)])
    }

    /// Check every coordinate against the current extents.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::MalformedGrid`] if the grid has no rows or no columns
    /// - [`InvalidInput::RowOutOfRange`] / [`InvalidInput::ColumnOutOfRange`]
    ///   for the first coordinate outside the grid
    pub fn validate_coordinates(&self, coordinates: &[Coordinate]) -> Result<()> {
        if !self.config.is_usable() {
            return Err(InvalidInput::MalformedGrid.into());
        }

        for coordinate in coordinates {
            if coordinate.row >= self.rows() {
                return Err(InvalidInput::RowOutOfRange {
                    row: coordinate.row,
                    rows: self.rows(),
                }
                .into());
            }
            if coordinate.column >= self.columns() {
                return Err(InvalidInput::ColumnOutOfRange {
                    column: coordinate.column,
                    columns: self.columns(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Whether `coordinates` may be reserved together as `group` right now.
    ///
    /// Returns `false` (never an error) for an empty set or any coordinate
    /// that fails [`validate_coordinates`](Self::validate_coordinates).
    #[must_use]
    pub fn is_valid_group(&self, coordinates: &[Coordinate], group: &GroupName) -> bool {
        if coordinates.is_empty() || self.validate_coordinates(coordinates).is_err() {
            return false;
        }

        if coordinates
            .iter()
            .any(|c| self.seats[self.index(*c)].is_reserved())
        {
            return false;
        }

        let min_distance = self.min_distance();
        !self
            .reserved()
            .filter(|(_, holder)| *holder != group)
            .any(|(taken, _)| {
                coordinates
                    .iter()
                    .any(|candidate| distance(taken, *candidate) <= min_distance)
            })
    }

    /// Reserve `coordinates` for `group`.
    ///
    /// # Errors
    ///
    /// - [`SeatingError::InvalidInput`] if validation fails
    /// - [`SeatingError::Conflict`] if [`is_valid_group`](Self::is_valid_group)
    ///   rejects the set
    pub fn reserve(&mut self, coordinates: &[Coordinate], group: GroupName) -> Result<()> {
        self.validate_coordinates(coordinates)?;

        if !self.is_valid_group(coordinates, &group) {
            return Err(SeatingError::Conflict);
        }

        for coordinate in coordinates {
            let index = self.index(*coordinate);
            self.seats[index] = Seat::Reserved {
                group: group.clone(),
            };
        }

        Ok(())
    }

    /// Release the reservation of `coordinates`.
    ///
    /// # Errors
    ///
    /// - [`SeatingError::InvalidInput`] if validation fails
    /// - [`SeatingError::NotReserved`] naming the first target that is
    ///   currently available; nothing is released in that case
    pub fn cancel(&mut self, coordinates: &[Coordinate]) -> Result<()> {
        self.validate_coordinates(coordinates)?;

        if let Some(free) = coordinates
            .iter()
            .find(|c| !self.seats[self.index(**c)].is_reserved())
        {
            return Err(SeatingError::NotReserved(*free));
        }

        for coordinate in coordinates {
            let index = self.index(*coordinate);
            self.seats[index] = Seat::Available;
        }

        Ok(())
    }

    /// Apply a command.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn apply(&mut self, command: GridCommand) -> Result<GridOutcome> {
        match command {
            GridCommand::Configure(config) => Ok(GridOutcome::Configured(self.configure(config))),
            GridCommand::Reserve { seats, group } => {
                self.reserve(&seats, group)?;
                Ok(GridOutcome::Reserved { count: seats.len() })
            }
            GridCommand::Cancel { seats } => {
                self.cancel(&seats)?;
                Ok(GridOutcome::Cancelled { count: seats.len() })
            }
        }
    }

    /// Every available seat, row-major.
    #[must_use]
    pub fn list_available(&self) -> Vec<Coordinate> {
        self.cells()
            .filter(|(_, seat)| !seat.is_reserved())
            .map(|(coordinate, _)| coordinate)
            .collect()
    }

    /// Every reserved seat with its group, row-major.
    pub fn reserved(&self) -> impl Iterator<Item = (Coordinate, &GroupName)> + '_ {
        self.cells()
            .filter_map(|(coordinate, seat)| seat.group().map(|group| (coordinate, group)))
    }

    /// Number of reserved seats.
    #[must_use]
    pub fn reserved_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_reserved()).count()
    }

    /// Every seat with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &Seat)> + '_ {
        let columns = self.columns();
        self.seats
            .iter()
            .enumerate()
            .map(move |(index, seat)| (Coordinate::new(index / columns, index % columns), seat))
    }

    /// Diagnostic dump: one line per row, occupancy codes separated by a
    /// space, no trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        if self.columns() == 0 {
            return vec![""; self.rows()].join("\n");
        }

        self.seats
            .chunks(self.columns())
            .map(|row| {
                row.iter()
                    .map(|seat| seat.occupancy().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.config.rows && coordinate.column < self.config.columns
    }

    const fn index(&self, coordinate: Coordinate) -> usize {
        coordinate.row * self.config.columns + coordinate.column
    }
}

impl fmt::Display for SeatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
