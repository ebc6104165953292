//! Application state for the cinema HTTP server.

use crate::service::CinemaService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Seating operations over the grid store
    pub cinema: Arc<CinemaService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(cinema: CinemaService) -> Self {
        Self {
            cinema: Arc::new(cinema),
        }
    }
}
