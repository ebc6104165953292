//! Grouped availability.
//!
//! [`SeatGrid::list_available`] answers "which seats are free". Front ends
//! selling to a *new* party need a narrower answer: which free seats that
//! party could actually take, given everyone already seated. This module
//! partitions those seats into blocks of side-by-side seats in one row, the
//! unit a box office offers to a party.

use crate::coordinate::Coordinate;
use crate::distance::distance;
use crate::grid::SeatGrid;

/// A maximal run of consecutive open seats within one row.
pub type SeatBlock = Vec<Coordinate>;

impl SeatGrid {
    /// Whether a party not yet seated could reserve `coordinate`.
    ///
    /// True when the seat is in bounds, available, and no reserved seat of
    /// any group lies within `min_distance` of it.
    #[must_use]
    pub fn is_open_to_new_party(&self, coordinate: Coordinate) -> bool {
        if !self.contains(coordinate) {
            return false;
        }
        if self.seat(coordinate).is_some_and(|seat| seat.is_reserved()) {
            return false;
        }

        let min_distance = self.min_distance();
        !self
            .reserved()
            .any(|(taken, _)| distance(taken, coordinate) <= min_distance)
    }

    /// Open seats partitioned into blocks, row-major.
    ///
    /// Each block is a maximal run of horizontally adjacent seats for which
    /// [`is_open_to_new_party`](Self::is_open_to_new_party) holds. Blocks are
    /// ordered by row, then by first column.
    ///
    /// Runs in time linear in the number of seats, however many are reserved.
    #[must_use]
    pub fn available_blocks(&self) -> Vec<SeatBlock> {
        let nearest = self.nearest_reserved();
        let min_distance = self.min_distance();
        let columns = self.columns();

        let mut blocks = Vec::new();
        for row in 0..self.rows() {
            let mut current = SeatBlock::new();
            for column in 0..columns {
                if nearest[row * columns + column] > min_distance {
                    current.push(Coordinate::new(row, column));
                } else if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
            }
            if !current.is_empty() {
                blocks.push(current);
            }
        }
        blocks
    }

    /// Taxicab distance from every seat to the nearest reserved seat,
    /// row-major; `usize::MAX` when nothing is reserved.
    ///
    /// Two sweeps suffice: each seat's nearest reservation is reached by a
    /// monotone path, from above-left or from below-right.
    fn nearest_reserved(&self) -> Vec<usize> {
        let (rows, columns) = (self.rows(), self.columns());
        let mut nearest: Vec<usize> = self
            .cells()
            .map(|(_, seat)| if seat.is_reserved() { 0 } else { usize::MAX })
            .collect();

        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                let mut best = nearest[index];
                if row > 0 {
                    best = best.min(nearest[index - columns].saturating_add(1));
                }
                if column > 0 {
                    best = best.min(nearest[index - 1].saturating_add(1));
                }
                nearest[index] = best;
            }
        }

        for row in (0..rows).rev() {
            for column in (0..columns).rev() {
                let index = row * columns + column;
                let mut best = nearest[index];
                if row + 1 < rows {
                    best = best.min(nearest[index + columns].saturating_add(1));
                }
                if column + 1 < columns {
                    best = best.min(nearest[index + 1].saturating_add(1));
                }
                nearest[index] = best;
            }
        }
        nearest
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{Coordinate, GridConfig, GroupName, SeatGrid};

    fn at(row: usize, column: usize) -> Coordinate {
        Coordinate::new(row, column)
    }

    #[test]
    fn test_fresh_grid_one_block_per_row() {
        let grid = SeatGrid::new(GridConfig::new(3, 4, 2));
        let blocks = grid.available_blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], vec![at(1, 0), at(1, 1), at(1, 2), at(1, 3)]);
    }

    #[test]
    fn test_reservation_splits_row() {
        let mut grid = SeatGrid::new(GridConfig::new(1, 7, 1));
        grid.reserve(&[at(0, 3)], GroupName::new("a").unwrap())
            .unwrap();

        // (0, 2) and (0, 4) are within distance 1 of the reserved seat
        assert_eq!(
            grid.available_blocks(),
            vec![vec![at(0, 0), at(0, 1)], vec![at(0, 5), at(0, 6)]]
        );
    }

    #[test]
    fn test_blocks_exclude_rows_fully_in_range() {
        let mut grid = SeatGrid::new(GridConfig::new(3, 2, 1));
        grid.reserve(&[at(1, 0)], GroupName::new("a").unwrap())
            .unwrap();

        // Row 1 is entirely within distance 1 of (1, 0), or reserved
        assert_eq!(
            grid.available_blocks(),
            vec![vec![at(0, 1)], vec![at(2, 1)]]
        );
    }

    #[test]
    fn test_no_blocks_when_everything_is_in_range() {
        let mut grid = SeatGrid::new(GridConfig::new(2, 2, 5));
        grid.reserve(&[at(0, 0)], GroupName::new("a").unwrap())
            .unwrap();
        assert!(grid.available_blocks().is_empty());
        assert!(!grid.is_open_to_new_party(at(1, 1)));
    }

    #[test]
    fn test_blocks_agree_with_per_seat_check() {
        let mut grid = SeatGrid::new(GridConfig::new(6, 9, 2));
        grid.reserve(&[at(0, 0), at(0, 1)], GroupName::new("a").unwrap())
            .unwrap();
        grid.reserve(&[at(5, 8)], GroupName::new("b").unwrap())
            .unwrap();
        grid.reserve(&[at(2, 5)], GroupName::new("c").unwrap())
            .unwrap();

        let expected: Vec<Coordinate> = grid
            .cells()
            .map(|(coordinate, _)| coordinate)
            .filter(|coordinate| grid.is_open_to_new_party(*coordinate))
            .collect();
        let flattened: Vec<Coordinate> = grid.available_blocks().concat();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_fully_booked_large_grid_has_no_blocks() {
        let config = GridConfig::new(300, 300, 0);
        let mut grid = SeatGrid::new(config);
        let everything: Vec<Coordinate> = grid.cells().map(|(coordinate, _)| coordinate).collect();
        grid.reserve(&everything, GroupName::new("a").unwrap())
            .unwrap();

        assert!(grid.available_blocks().is_empty());

        grid.cancel(&[at(150, 150)]).unwrap();
        assert_eq!(grid.available_blocks(), vec![vec![at(150, 150)]]);
    }

    #[test]
    fn test_open_to_new_party_out_of_bounds() {
        let grid = SeatGrid::new(GridConfig::new(2, 2, 0));
        assert!(grid.is_open_to_new_party(at(1, 1)));
        assert!(!grid.is_open_to_new_party(at(2, 0)));
    }
}
