//! Logging initialization.
//!
//! The subscriber is only compiled in with the `telemetry` feature so library
//! consumers that install their own subscriber do not pull it in.

#[cfg(feature = "telemetry")]
use crate::CatalogError;
use crate::CatalogResult;
use serde::{Deserialize, Serialize};
#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Whether to include span targets in output.
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_log_level() -> String {
    "info,openmusic=debug".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_with_target() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            with_target: default_with_target(),
        }
    }
}

impl TelemetryConfig {
    /// True when JSON output is requested.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Installs the global tracing subscriber.
///
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "telemetry")]
pub fn init_logging(config: &TelemetryConfig) -> CatalogResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| CatalogError::Configuration(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = if config.is_json() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(config.with_target)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CatalogError::Configuration(format!("Failed to install subscriber: {}", e)))
}

/// No-op when the `telemetry` feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_config: &TelemetryConfig) -> CatalogResult<()> {
    Ok(())
}
