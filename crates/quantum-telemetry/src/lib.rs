//! # Quantum Telemetry
//!
//! Logging and metrics for Quantum-Chain subsystems.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with pretty or JSON output
//! - **Metrics**: Prometheus counters and histograms in a global registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("10", "pqc-validation");
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_SUBSYSTEM_ID` | `00` | Subsystem identifier |
//! | `QC_LOG_LEVEL` | `info` | Log level filter, `RUST_LOG` as fallback |
//! | `QC_CONSOLE_OUTPUT` | `true` | Install a formatting layer |
//! | `QC_JSON_LOGS` | `false` | JSON log output |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, PQC_BLOCK_ADMISSION_REJECTIONS,
    PQC_BLOCK_VALIDATION_DURATION, PQC_DECODE_FAILURES, PQC_VALIDATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first
    let metrics_handle = register_metrics()?;

    init_logging(&config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
