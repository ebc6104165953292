//! Cinema service.
//!
//! Orchestrates the seat grids held in a [`GridStore`]. Every mutation runs
//! as a transaction on one cinema: take the cinema's write lock, fetch a copy,
//! change it, write the copy back. A change that fails leaves the stored grid
//! untouched because the copy is simply dropped.
//!
//! Each operation runs in a span parented on the span handed to
//! [`CinemaService::new`]; failures are logged there and returned typed.

use crate::config::GridLimits;
use crate::metrics::{self, Outcome};
use crate::storage::{GridId, GridStore, StoreError};
use seating_core::{
    Coordinate, ErrorKind, GridConfig, GroupName, Reconfigured, SeatGrid, SeatingError,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, Span};

/// Errors returned by [`CinemaService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The seat grid rejected the operation
    #[error(transparent)]
    Seating(#[from] SeatingError),

    /// The store failed or does not know the cinema
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `set_offset` does not select an availability block
    #[error("set offset {offset} is out of range [0, {sets})")]
    OffsetOutOfRange {
        /// Requested offset
        offset: i64,
        /// Number of availability blocks
        sets: usize,
    },

    /// The requested extents exceed the configured [`GridLimits`]
    #[error("a {rows}x{columns} grid exceeds the configured limits")]
    GridTooLarge {
        /// Requested rows
        rows: usize,
        /// Requested columns
        columns: usize,
    },
}

impl ServiceError {
    /// Metrics outcome label for this failure.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Seating(err) => match err.kind() {
                ErrorKind::InvalidInput => Outcome::Invalid,
                ErrorKind::Conflict | ErrorKind::NotReserved => Outcome::Rejected,
            },
            Self::Store(StoreError::NotFound(_) | StoreError::InvalidId(_))
            | Self::OffsetOutOfRange { .. }
            | Self::GridTooLarge { .. } => Outcome::Invalid,
            Self::Store(_) => Outcome::Error,
        }
    }
}

impl GridLimits {
    /// Check `config` against these limits.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GridTooLarge`] if any bound is exceeded.
    pub const fn check(&self, config: &GridConfig) -> Result<(), ServiceError> {
        if config.rows > self.max_rows
            || config.columns > self.max_columns
            || config.seat_count() > self.max_seats
        {
            return Err(ServiceError::GridTooLarge {
                rows: config.rows,
                columns: config.columns,
            });
        }
        Ok(())
    }
}

/// Result of [`CinemaService::update_config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigureOutcome {
    /// Whether the layout was rebuilt
    pub reset: bool,
    /// Reservations dropped by the rebuild
    pub discarded: usize,
}

impl From<Reconfigured> for ConfigureOutcome {
    fn from(reconfigured: Reconfigured) -> Self {
        match reconfigured {
            Reconfigured::Preserved => Self {
                reset: false,
                discarded: 0,
            },
            Reconfigured::Reset { discarded } => Self {
                reset: true,
                discarded,
            },
        }
    }
}

/// One page of grouped availability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvailableSeats {
    /// Seats of the selected block, left to right
    pub seats: Vec<Coordinate>,
    /// Rendered occupancy of the whole grid
    pub grid: String,
    /// Number of blocks available to page through
    pub total_sets: usize,
}

/// Seats held by one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSeats {
    /// Group name
    pub group: GroupName,
    /// Seats held, row-major
    pub seats: Vec<Coordinate>,
}

/// Read-only view of one cinema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    /// Cinema id
    pub id: GridId,
    /// Extents and distance
    #[serde(flatten)]
    pub config: GridConfig,
    /// Rendered occupancy
    pub grid: String,
    /// Number of available seats
    pub available: usize,
    /// Reservations by group, ordered by group name
    pub groups: Vec<GroupSeats>,
}

/// A change applied to a stored grid, with the reserved-seat counts around it.
struct Applied<T> {
    value: T,
    reserved_before: usize,
    reserved_after: usize,
}

/// Cinema seating operations over a [`GridStore`].
#[derive(Clone)]
pub struct CinemaService {
    store: Arc<dyn GridStore>,
    limits: GridLimits,
    span: Span,
}

impl CinemaService {
    /// Creates a new `CinemaService`.
    ///
    /// # Arguments
    ///
    /// - `store`: Where grids live
    /// - `limits`: Bounds on configured extents
    /// - `span`: Parent span for every operation's diagnostics
    #[must_use]
    pub fn new(store: Arc<dyn GridStore>, limits: GridLimits, span: Span) -> Self {
        Self {
            store,
            limits,
            span,
        }
    }

    /// Create a cinema with every seat available.
    ///
    /// # Errors
    ///
    /// [`ServiceError::GridTooLarge`] if `config` exceeds the limits, or a
    /// store failure.
    pub async fn configure_cinema(&self, config: GridConfig) -> Result<GridId, ServiceError> {
        let span = tracing::info_span!(
            parent: &self.span,
            "configure_cinema",
            rows = config.rows,
            columns = config.columns,
            min_distance = config.min_distance,
        );
        traced(span, async {
            self.limits.check(&config)?;
            let id = self.store.insert(SeatGrid::try_new(config)?).await?;

            metrics::record_grid_created();
            tracing::info!(cinema_id = %id, "Cinema configured");
            Ok(id)
        })
        .await
    }

    /// Reconfigure a cinema.
    ///
    /// Changing rows or columns rebuilds the grid and discards every
    /// reservation; changing only `min_distance` keeps them.
    ///
    /// # Errors
    ///
    /// [`ServiceError::GridTooLarge`], [`StoreError::NotFound`], or a store
    /// failure.
    pub async fn update_config(
        &self,
        id: GridId,
        config: GridConfig,
    ) -> Result<ConfigureOutcome, ServiceError> {
        let span = tracing::info_span!(
            parent: &self.span,
            "update_config",
            cinema_id = %id,
            rows = config.rows,
            columns = config.columns,
            min_distance = config.min_distance,
        );
        traced(span, async {
            self.limits.check(&config)?;
            let applied = self
                .transact(id, |grid| Ok(grid.configure(config)))
                .await?;

            let outcome = ConfigureOutcome::from(applied.value);
            metrics::record_grid_reconfigured(outcome.reset.then_some(outcome.discarded));
            tracing::info!(reset = outcome.reset, discarded = outcome.discarded, "Cinema reconfigured");
            Ok(outcome)
        })
        .await
    }

    /// One block of seats a new party could book, selected by `set_offset`.
    ///
    /// Blocks are maximal horizontal runs of open seats, row-major. With no
    /// blocks at all the result is empty whatever the offset.
    ///
    /// # Errors
    ///
    /// [`ServiceError::OffsetOutOfRange`] if `set_offset` is not in
    /// `[0, total_sets)`, [`StoreError::NotFound`], or a store failure.
    pub async fn available_seats(
        &self,
        id: GridId,
        set_offset: i64,
    ) -> Result<AvailableSeats, ServiceError> {
        let span = tracing::debug_span!(
            parent: &self.span,
            "available_seats",
            cinema_id = %id,
            set_offset,
        );
        traced(span, async {
            let grid = self.store.fetch(id).await?;
            let blocks = grid.available_blocks();
            let total_sets = blocks.len();

            if blocks.is_empty() {
                return Ok(AvailableSeats {
                    seats: Vec::new(),
                    grid: grid.render(),
                    total_sets,
                });
            }

            let seats = usize::try_from(set_offset)
                .ok()
                .and_then(|index| blocks.into_iter().nth(index))
                .ok_or(ServiceError::OffsetOutOfRange {
                    offset: set_offset,
                    sets: total_sets,
                })?;

            Ok(AvailableSeats {
                seats,
                grid: grid.render(),
                total_sets,
            })
        })
        .await
    }

    /// Reserve `seats` for `group`, all or nothing.
    ///
    /// # Errors
    ///
    /// [`SeatingError`] when the grid refuses, [`StoreError::NotFound`], or a
    /// store failure.
    pub async fn reserve_seats(
        &self,
        id: GridId,
        seats: &[Coordinate],
        group: GroupName,
    ) -> Result<(), ServiceError> {
        let span = tracing::info_span!(
            parent: &self.span,
            "reserve_seats",
            cinema_id = %id,
            group = %group,
            seats = seats.len(),
        );
        traced(span, async {
            match self.transact(id, |grid| grid.reserve(seats, group)).await {
                Ok(applied) => {
                    let reserved = applied.reserved_after.saturating_sub(applied.reserved_before);
                    metrics::record_reservation(Outcome::Success, reserved);
                    tracing::info!(reserved, "Seats reserved");
                    Ok(())
                }
                Err(err) => {
                    metrics::record_reservation(err.outcome(), 0);
                    Err(err)
                }
            }
        })
        .await
    }

    /// Release `seats`, all or nothing.
    ///
    /// # Errors
    ///
    /// [`SeatingError::NotReserved`] if any target is free, other
    /// [`SeatingError`]s for bad input, [`StoreError::NotFound`], or a store
    /// failure.
    pub async fn cancel_seats(&self, id: GridId, seats: &[Coordinate]) -> Result<(), ServiceError> {
        let span = tracing::info_span!(
            parent: &self.span,
            "cancel_seats",
            cinema_id = %id,
            seats = seats.len(),
        );
        traced(span, async {
            match self.transact(id, |grid| grid.cancel(seats)).await {
                Ok(applied) => {
                    let released = applied.reserved_before.saturating_sub(applied.reserved_after);
                    metrics::record_cancellation(Outcome::Success, released);
                    tracing::info!(released, "Seats released");
                    Ok(())
                }
                Err(err) => {
                    metrics::record_cancellation(err.outcome(), 0);
                    Err(err)
                }
            }
        })
        .await
    }

    /// Configuration, layout and reservations of one cinema.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] or a store failure.
    pub async fn grid_snapshot(&self, id: GridId) -> Result<GridSnapshot, ServiceError> {
        let span = tracing::debug_span!(parent: &self.span, "grid_snapshot", cinema_id = %id);
        traced(span, async {
            let grid = self.store.fetch(id).await?;

            let mut by_group: BTreeMap<&GroupName, Vec<Coordinate>> = BTreeMap::new();
            for (coordinate, group) in grid.reserved() {
                by_group.entry(group).or_default().push(coordinate);
            }
            let groups = by_group
                .into_iter()
                .map(|(group, seats)| GroupSeats {
                    group: group.clone(),
                    seats,
                })
                .collect();

            Ok(GridSnapshot {
                id,
                config: grid.config(),
                grid: grid.render(),
                available: grid.list_available().len(),
                groups,
            })
        })
        .await
    }

    /// Number of configured cinemas.
    ///
    /// # Errors
    ///
    /// A store failure.
    pub async fn cinema_count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len().await?)
    }

    async fn transact<T>(
        &self,
        id: GridId,
        change: impl FnOnce(&mut SeatGrid) -> Result<T, SeatingError> + Send,
    ) -> Result<Applied<T>, ServiceError> {
        let _guard = self.store.lock(id).await?;
        let mut grid = self.store.fetch(id).await?;

        let reserved_before = grid.reserved_count();
        let value = change(&mut grid)?;
        let reserved_after = grid.reserved_count();

        self.store.replace(id, grid).await?;
        Ok(Applied {
            value,
            reserved_before,
            reserved_after,
        })
    }
}

/// Run `operation` inside `span`, logging a failure before returning it.
async fn traced<T>(
    span: Span,
    operation: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    async move {
        let result = operation.await;
        if let Err(err) = &result {
            match err.outcome() {
                Outcome::Error => tracing::error!(error = %err, "Cinema operation failed"),
                _ => tracing::info!(error = %err, "Cinema operation rejected"),
            }
        }
        result
    }
    .instrument(span)
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::InMemoryGridStore;
    use seating_core::InvalidInput;

    fn service() -> CinemaService {
        CinemaService::new(
            Arc::new(InMemoryGridStore::new()),
            GridLimits::default(),
            Span::none(),
        )
    }

    fn group(name: &str) -> GroupName {
        GroupName::new(name).unwrap()
    }

    fn at(row: usize, column: usize) -> Coordinate {
        Coordinate::new(row, column)
    }

    #[tokio::test]
    async fn test_configure_then_snapshot() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(2, 3, 1))
            .await
            .unwrap();

        let snapshot = service.grid_snapshot(id).await.unwrap();
        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.config, GridConfig::new(2, 3, 1));
        assert_eq!(snapshot.grid, "0 0 0\n0 0 0");
        assert_eq!(snapshot.available, 6);
        assert!(snapshot.groups.is_empty());
        assert_eq!(service.cinema_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_configure_rejects_oversized_grid() {
        let service = CinemaService::new(
            Arc::new(InMemoryGridStore::new()),
            GridLimits {
                max_rows: 10,
                max_columns: 10,
                max_seats: 50,
            },
            Span::none(),
        );

        let err = service
            .configure_cinema(GridConfig::new(8, 8, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::GridTooLarge { rows: 8, columns: 8 }));
        assert_eq!(service.cinema_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_configure_unallocatable_grid_is_invalid_input() {
        let service = CinemaService::new(
            Arc::new(InMemoryGridStore::new()),
            GridLimits {
                max_rows: usize::MAX,
                max_columns: usize::MAX,
                max_seats: usize::MAX,
            },
            Span::none(),
        );

        let err = service
            .configure_cinema(GridConfig::new(1 << 33, 1 << 33, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Seating(SeatingError::InvalidInput(InvalidInput::GridTooLarge { .. }))
        ));
        assert_eq!(err.outcome(), Outcome::Invalid);
        assert_eq!(service.cinema_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reserve_and_snapshot_groups() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(3, 5, 2))
            .await
            .unwrap();

        service
            .reserve_seats(id, &[at(0, 0), at(0, 1)], group("smiths"))
            .await
            .unwrap();
        service
            .reserve_seats(id, &[at(2, 4)], group("jones"))
            .await
            .unwrap();

        let snapshot = service.grid_snapshot(id).await.unwrap();
        assert_eq!(snapshot.grid, "1 1 0 0 0\n0 0 0 0 0\n0 0 0 0 1");
        assert_eq!(
            snapshot.groups,
            vec![
                GroupSeats {
                    group: group("jones"),
                    seats: vec![at(2, 4)],
                },
                GroupSeats {
                    group: group("smiths"),
                    seats: vec![at(0, 0), at(0, 1)],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_reserve_is_not_persisted() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(1, 5, 2))
            .await
            .unwrap();
        service
            .reserve_seats(id, &[at(0, 0)], group("a"))
            .await
            .unwrap();

        let err = service
            .reserve_seats(id, &[at(0, 4), at(0, 2)], group("b"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Seating(SeatingError::Conflict)));
        assert_eq!(service.grid_snapshot(id).await.unwrap().grid, "1 0 0 0 0");
    }

    #[tokio::test]
    async fn test_cancel_not_reserved() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(2, 2, 0))
            .await
            .unwrap();

        let err = service.cancel_seats(id, &[at(1, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Seating(SeatingError::NotReserved(seat)) if seat == at(1, 1)
        ));
        assert_eq!(err.outcome(), Outcome::Rejected);
    }

    #[tokio::test]
    async fn test_reserve_out_of_bounds_is_invalid_input() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(2, 2, 0))
            .await
            .unwrap();

        let err = service
            .reserve_seats(id, &[at(2, 0)], group("a"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Seating(SeatingError::InvalidInput(InvalidInput::RowOutOfRange { row: 2, rows: 2 }))
        ));
        assert_eq!(err.outcome(), Outcome::Invalid);
    }

    #[tokio::test]
    async fn test_unknown_cinema_is_not_found() {
        let service = service();
        let missing = GridId::new();

        for err in [
            service.grid_snapshot(missing).await.unwrap_err(),
            service.available_seats(missing, 0).await.unwrap_err(),
            service.cancel_seats(missing, &[]).await.unwrap_err(),
            service
                .update_config(missing, GridConfig::new(1, 1, 0))
                .await
                .unwrap_err(),
        ] {
            assert!(matches!(err, ServiceError::Store(StoreError::NotFound(id)) if id == missing));
        }
        assert_eq!(service.cinema_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_writes_to_unknown_cinemas_leave_no_locks_behind() {
        let store = Arc::new(InMemoryGridStore::new());
        let service = CinemaService::new(store.clone(), GridLimits::default(), Span::none());

        for _ in 0..1000 {
            service.cancel_seats(GridId::new(), &[]).await.unwrap_err();
        }
        service
            .reserve_seats(GridId::new(), &[at(0, 0)], group("a"))
            .await
            .unwrap_err();
        service
            .update_config(GridId::new(), GridConfig::new(1, 1, 0))
            .await
            .unwrap_err();
        assert_eq!(store.lock_entries(), 0);

        let id = service
            .configure_cinema(GridConfig::new(1, 3, 0))
            .await
            .unwrap();
        service.reserve_seats(id, &[at(0, 0)], group("a")).await.unwrap();
        service.cancel_seats(id, &[at(0, 0)]).await.unwrap();
        assert_eq!(store.lock_entries(), 0);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_config_reports_reset() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(2, 2, 0))
            .await
            .unwrap();
        service
            .reserve_seats(id, &[at(0, 0), at(1, 1)], group("a"))
            .await
            .unwrap();

        let kept = service
            .update_config(id, GridConfig::new(2, 2, 3))
            .await
            .unwrap();
        assert_eq!(
            kept,
            ConfigureOutcome {
                reset: false,
                discarded: 0
            }
        );
        assert_eq!(service.grid_snapshot(id).await.unwrap().config.min_distance, 3);

        let reset = service
            .update_config(id, GridConfig::new(3, 2, 3))
            .await
            .unwrap();
        assert_eq!(
            reset,
            ConfigureOutcome {
                reset: true,
                discarded: 2
            }
        );
        assert_eq!(service.grid_snapshot(id).await.unwrap().available, 6);
    }

    #[tokio::test]
    async fn test_available_seats_pages_through_blocks() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(2, 5, 1))
            .await
            .unwrap();
        service
            .reserve_seats(id, &[at(0, 2)], group("a"))
            .await
            .unwrap();

        // Open to a new party: (0,0) and (0,4) in row 0; row 1 minus (1,2)
        let first = service.available_seats(id, 0).await.unwrap();
        assert_eq!(first.seats, vec![at(0, 0)]);
        assert_eq!(first.total_sets, 4);
        assert_eq!(first.grid, "0 0 1 0 0\n0 0 0 0 0");

        let last = service.available_seats(id, 3).await.unwrap();
        assert_eq!(last.seats, vec![at(1, 3), at(1, 4)]);

        for offset in [-1, 4] {
            let err = service.available_seats(id, offset).await.unwrap_err();
            assert!(matches!(
                err,
                ServiceError::OffsetOutOfRange { offset: o, sets: 4 } if o == offset
            ));
        }
    }

    #[tokio::test]
    async fn test_available_seats_empty_when_no_blocks() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(1, 2, 0))
            .await
            .unwrap();
        service
            .reserve_seats(id, &[at(0, 0), at(0, 1)], group("a"))
            .await
            .unwrap();

        let page = service.available_seats(id, 7).await.unwrap();
        assert!(page.seats.is_empty());
        assert_eq!(page.total_sets, 0);
        assert_eq!(page.grid, "1 1");
    }

    #[tokio::test]
    async fn test_concurrent_reservations_of_same_seat() {
        let service = service();
        let id = service
            .configure_cinema(GridConfig::new(3, 3, 1))
            .await
            .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .reserve_seats(id, &[at(1, 1)], group(&format!("g{i}")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(service.grid_snapshot(id).await.unwrap().groups.len(), 1);
    }
}
