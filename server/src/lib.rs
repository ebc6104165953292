//! Cinema seating server.
//!
//! An HTTP service that lets a box office configure cinemas, page through
//! blocks of seats a new party could take, and reserve or cancel seats under
//! a group-distancing rule: seats of different groups must be more than
//! `min_distance` apart (taxicab distance), while a group may sit together.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────┐
//! │  api + server (Axum)          │  ← JSON, status codes, correlation IDs
//! ├───────────────────────────────┤
//! │  service::CinemaService       │  ← per-cinema transactions, logging, metrics
//! ├───────────────────────────────┤
//! │  storage::GridStore           │  ← copies out, locks per cinema
//! ├───────────────────────────────┤
//! │  seating_core::SeatGrid       │  ← pure reservation rules
//! └───────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cinema_server::{build_router, AppState, CinemaService, Config, InMemoryGridStore};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env();
//! let service = CinemaService::new(
//!     Arc::new(InMemoryGridStore::new()),
//!     config.limits,
//!     tracing::info_span!("cinema"),
//! );
//! let app = build_router(AppState::new(service));
//!
//! let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;
pub mod service;
pub mod storage;

pub use config::{Config, GridLimits};
pub use server::{build_router, AppState};
pub use service::{CinemaService, ServiceError};
pub use storage::{GridId, GridStore, InMemoryGridStore, StoreError};
