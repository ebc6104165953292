//! Seat grid storage.
//!
//! A [`GridStore`] keeps one [`SeatGrid`] per cinema, keyed by [`GridId`].
//! Reads hand out independent copies; writers serialize per cinema through
//! [`GridStore::lock`], so a fetch, mutate, replace cycle under the guard is
//! a transaction for that cinema while other cinemas proceed in parallel.

use async_trait::async_trait;
use seating_core::SeatGrid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a configured cinema
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridId(Uuid);

impl GridId {
    /// Creates a new random `GridId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GridId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GridId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by a [`GridStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not a valid cinema identifier
    #[error("invalid cinema id: {0:?}")]
    InvalidId(String),

    /// No cinema is stored under this id
    #[error("cinema {0} not found")]
    NotFound(GridId),

    /// A writer panicked while holding the records lock
    #[error("grid store lock poisoned")]
    Poisoned,
}

// ============================================================================
// Store trait
// ============================================================================

/// Per-cinema writer locks, present only while some writer holds or awaits one.
type LockTable = Mutex<HashMap<GridId, Arc<tokio::sync::Mutex<()>>>>;

/// Exclusive write access to one cinema, released on drop.
#[derive(Debug)]
pub struct WriteGuard {
    id: GridId,
    guard: Option<OwnedMutexGuard<()>>,
    table: Arc<LockTable>,
}

impl WriteGuard {
    /// The cinema this guard protects
    #[must_use]
    pub const fn id(&self) -> GridId {
        self.id
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        // The table's own handle is the last one once no writer waits.
        if let Ok(mut locks) = self.table.lock() {
            if locks
                .get(&self.id)
                .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
            {
                locks.remove(&self.id);
            }
        }
    }
}

/// Keyed storage of seat grids.
#[async_trait]
pub trait GridStore: Send + Sync {
    /// Store a new grid under a fresh id and return the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store is unusable.
    async fn insert(&self, grid: SeatGrid) -> Result<GridId, StoreError>;

    /// An independent copy of the grid stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    async fn fetch(&self, id: GridId) -> Result<SeatGrid, StoreError>;

    /// Overwrite the grid stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id; replace never
    /// creates a record.
    async fn replace(&self, id: GridId, grid: SeatGrid) -> Result<(), StoreError>;

    /// Wait for exclusive write access to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or
    /// [`StoreError::Poisoned`] if the store is unusable.
    async fn lock(&self, id: GridId) -> Result<WriteGuard, StoreError>;

    /// Number of stored grids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store is unusable.
    async fn len(&self) -> Result<usize, StoreError>;

    /// Whether no grid is stored.
    ///
    /// # Errors
    ///
    /// Same as [`len`](Self::len).
    async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// [`GridStore`] backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryGridStore {
    grids: RwLock<HashMap<GridId, SeatGrid>>,
    locks: Arc<LockTable>,
}

impl InMemoryGridStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: GridId) -> Result<Arc<tokio::sync::Mutex<()>>, StoreError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        let grids = self.grids.read().map_err(|_| StoreError::Poisoned)?;
        if !grids.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        Ok(Arc::clone(locks.entry(id).or_default()))
    }

    /// Number of cinemas with a writer lock currently allocated.
    #[cfg(test)]
    pub(crate) fn lock_entries(&self) -> usize {
        self.locks.lock().map_or(0, |locks| locks.len())
    }
}

#[async_trait]
impl GridStore for InMemoryGridStore {
    async fn insert(&self, grid: SeatGrid) -> Result<GridId, StoreError> {
        let id = GridId::new();
        let mut grids = self.grids.write().map_err(|_| StoreError::Poisoned)?;
        grids.insert(id, grid);
        Ok(id)
    }

    async fn fetch(&self, id: GridId) -> Result<SeatGrid, StoreError> {
        let grids = self.grids.read().map_err(|_| StoreError::Poisoned)?;
        grids.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn replace(&self, id: GridId, grid: SeatGrid) -> Result<(), StoreError> {
        let mut grids = self.grids.write().map_err(|_| StoreError::Poisoned)?;
        let slot = grids.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = grid;
        Ok(())
    }

    async fn lock(&self, id: GridId) -> Result<WriteGuard, StoreError> {
        let mutex = self.lock_for(id)?;
        let guard = mutex.lock_owned().await;
        Ok(WriteGuard {
            id,
            guard: Some(guard),
            table: Arc::clone(&self.locks),
        })
    }

    async fn len(&self) -> Result<usize, StoreError> {
        let grids = self.grids.read().map_err(|_| StoreError::Poisoned)?;
        Ok(grids.len())
    }
}
