//! HTTP request handlers shared by every service in the workspace.

pub mod health;

pub use health::{health_check, healthz, HealthResponse};
