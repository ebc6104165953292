//! Business metrics for the cinema server.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `cinema_grids_configured_total{action}` - Grids created or reconfigured
//! - `cinema_reservations_total{outcome}` - Reservation attempts by outcome
//! - `cinema_cancellations_total{outcome}` - Cancellation attempts by outcome
//!
//! ## Gauges
//! - `cinema_seats_reserved` - Seats currently reserved across all cinemas
//!
//! Recording is a no-op until a recorder is installed, so tests need no setup.

#![allow(clippy::cast_precision_loss)] // Seat counts are far below 2^52

use metrics::{describe_counter, describe_gauge};

/// Outcome label for reservation and cancellation counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Applied and persisted
    Success,
    /// Rejected because of bad input
    Invalid,
    /// Rejected by the distancing rule or seat state
    Rejected,
    /// Failed for a reason outside the request
    Error,
}

impl Outcome {
    /// Label value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Invalid => "invalid",
            Self::Rejected => "rejected",
            Self::Error => "error",
        }
    }
}

/// Initialize and register all business metrics descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_business_metrics() {
    describe_counter!(
        "cinema_grids_configured_total",
        "Total number of grids configured, by action (created, preserved, reset)"
    );
    describe_counter!(
        "cinema_reservations_total",
        "Total number of reservation attempts by outcome"
    );
    describe_counter!(
        "cinema_cancellations_total",
        "Total number of cancellation attempts by outcome"
    );
    describe_gauge!(
        "cinema_seats_reserved",
        "Current number of reserved seats across all cinemas"
    );

    tracing::info!("Business metrics registered");
}

/// Record a newly configured cinema.
pub fn record_grid_created() {
    metrics::counter!("cinema_grids_configured_total", "action" => "created").increment(1);
    tracing::debug!("Recorded grid_created metric");
}

/// Record a reconfiguration.
///
/// # Arguments
///
/// * `discarded` - Reserved seats dropped by the reconfiguration, or `None`
///   if the layout was preserved
pub fn record_grid_reconfigured(discarded: Option<usize>) {
    match discarded {
        None => {
            metrics::counter!("cinema_grids_configured_total", "action" => "preserved")
                .increment(1);
        }
        Some(count) => {
            metrics::counter!("cinema_grids_configured_total", "action" => "reset").increment(1);
            metrics::gauge!("cinema_seats_reserved").decrement(count as f64);
        }
    }
    tracing::debug!(?discarded, "Recorded grid_reconfigured metric");
}

/// Record a reservation attempt.
///
/// # Arguments
///
/// * `outcome` - How the attempt ended
/// * `seats` - Seats reserved; only counted on success
pub fn record_reservation(outcome: Outcome, seats: usize) {
    metrics::counter!("cinema_reservations_total", "outcome" => outcome.as_str()).increment(1);
    if outcome == Outcome::Success {
        metrics::gauge!("cinema_seats_reserved").increment(seats as f64);
    }
    tracing::debug!(outcome = outcome.as_str(), seats, "Recorded reservation metric");
}

/// Record a cancellation attempt.
///
/// # Arguments
///
/// * `outcome` - How the attempt ended
/// * `seats` - Seats released; only counted on success
pub fn record_cancellation(outcome: Outcome, seats: usize) {
    metrics::counter!("cinema_cancellations_total", "outcome" => outcome.as_str()).increment(1);
    if outcome == Outcome::Success {
        metrics::gauge!("cinema_seats_reserved").decrement(seats as f64);
    }
    tracing::debug!(outcome = outcome.as_str(), seats, "Recorded cancellation metric");
}
