//! Configuration management for the cinema server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparseable values fall back to the default rather than failing startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Prometheus exporter configuration
    pub metrics: MetricsConfig,
    /// Bounds on the grids clients may configure
    pub limits: GridLimits,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Metrics exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus exporter
    pub enabled: bool,
    /// Metrics server host (for Prometheus scraping)
    pub host: String,
    /// Metrics server port
    pub port: u16,
}

/// Upper bounds on configured grids.
///
/// A grid is allocated eagerly, so these bound the memory one request can
/// claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridLimits {
    /// Largest accepted row count
    pub max_rows: usize,
    /// Largest accepted column count
    pub max_columns: usize,
    /// Largest accepted `rows * columns`
    pub max_seats: usize,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            max_rows: 1000,
            max_columns: 1000,
            max_seats: 100_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// [`from_env`](Self::from_env) is this with the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| Parsed(lookup(key));
        let limits = GridLimits::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed("PORT").or(8080),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                shutdown_timeout: parsed("SHUTDOWN_TIMEOUT").or(30),
            },
            metrics: MetricsConfig {
                enabled: parsed("METRICS_ENABLED").or(true),
                host: lookup("METRICS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed("METRICS_PORT").or(9090),
            },
            limits: GridLimits {
                max_rows: parsed("CINEMA_MAX_ROWS").or(limits.max_rows),
                max_columns: parsed("CINEMA_MAX_COLUMNS").or(limits.max_columns),
                max_seats: parsed("CINEMA_MAX_SEATS").or(limits.max_seats),
            },
        }
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Fallback tracing filter built from `log_level`.
    ///
    /// The seating crates log at `log_level`; request traces stay at debug.
    #[must_use]
    pub fn log_filter(&self) -> String {
        let level = self.server.log_level.trim();
        format!("cinema_server={level},seating_core={level},seating_web={level},tower_http=debug")
    }

    /// Address the Prometheus exporter binds to
    #[must_use]
    pub fn metrics_addr(&self) -> String {
        format!("{}:{}", self.metrics.host, self.metrics.port)
    }
}

/// A raw variable, parsed on demand into whatever type the field needs.
struct Parsed(Option<String>);

impl Parsed {
    fn or<T: FromStr>(self, default: T) -> T {
        self.0
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.metrics_addr(), "0.0.0.0:9090");
        assert!(config.metrics.enabled);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.shutdown_timeout, 30);
        assert_eq!(config.limits, GridLimits::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("METRICS_ENABLED", "false"),
            ("CINEMA_MAX_ROWS", "50"),
            ("CINEMA_MAX_SEATS", " 2500 "),
        ]);

        assert_eq!(config.server_addr(), "127.0.0.1:3000");
        assert!(!config.metrics.enabled);
        assert_eq!(config.limits.max_rows, 50);
        assert_eq!(config.limits.max_columns, 1000);
        assert_eq!(config.limits.max_seats, 2500);
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "eighty"), ("CINEMA_MAX_COLUMNS", "-4")]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.limits.max_columns, 1000);
    }

    #[test]
    fn test_log_filter_follows_log_level() {
        assert_eq!(
            config_from(&[]).log_filter(),
            "cinema_server=info,seating_core=info,seating_web=info,tower_http=debug"
        );
        assert_eq!(
            config_from(&[("LOG_LEVEL", " warn ")]).log_filter(),
            "cinema_server=warn,seating_core=warn,seating_web=warn,tower_http=debug"
        );
    }
}
