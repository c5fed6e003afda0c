//! # DynaQR Telemetry
//!
//! Tracing bootstrap shared by DynaQR binaries and test harnesses. The
//! registry core only emits `tracing` events; this crate decides where they
//! go: a human-readable console subscriber by default, JSON when a log
//! shipper consumes the output.
//!
//! Filtering follows the usual precedence: the `RUST_LOG` environment
//! variable wins, then the configured default level.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CONFIG
// =============================================================================

/// Telemetry configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every event.
    pub service_name: String,

    /// Default level filter when `RUST_LOG` is unset (e.g. `"info"`,
    /// `"dynaqr_registry=debug"`).
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "dynaqr".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("telemetry already initialized: {0}")]
    AlreadyInitialized(String),

    /// The configured filter directive failed to parse.
    #[error("invalid log filter {filter}: {reason}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Parser message.
        reason: String,
    },
}

// =============================================================================
// INIT
// =============================================================================

/// Installs the global tracing subscriber.
///
/// Safe to call once per process; later calls report
/// [`TelemetryError::AlreadyInitialized`]. Test harnesses that may race on
/// initialization should ignore that error.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter directive is malformed or a
/// subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "telemetry initialized"
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
