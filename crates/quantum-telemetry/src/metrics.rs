//! Prometheus metrics for PQC signature validation.
//!
//! All metrics follow the naming convention: `qc_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., validations_total)
//! - **Histogram**: Distribution of values (e.g., block_validation_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TRANSACTION VALIDATION
    // =========================================================================

    /// Validation decisions
    pub static ref PQC_VALIDATIONS: CounterVec = CounterVec::new(
        Opts::new("qc_pqc_validations_total", "Transaction validation decisions"),
        &["level", "kind", "outcome"]  // outcome: accepted or a rejection reason
    ).expect("metric creation failed");

    /// Wire inputs that failed to decode
    pub static ref PQC_DECODE_FAILURES: CounterVec = CounterVec::new(
        Opts::new("qc_pqc_decode_failures_total", "Transactions that failed to decode"),
        &["error"]  // error: malformed/unsupported_version
    ).expect("metric creation failed");

    // =========================================================================
    // BLOCK ADMISSION
    // =========================================================================

    /// Blocks rejected by the size gate
    pub static ref PQC_BLOCK_ADMISSION_REJECTIONS: Counter = Counter::new(
        "qc_pqc_block_admission_rejections_total",
        "Candidate blocks rejected for exceeding the size cap"
    ).expect("metric creation failed");

    /// Block validation pass duration
    pub static ref PQC_BLOCK_VALIDATION_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "qc_pqc_block_validation_duration_seconds",
            "Time spent validating all transactions of a block"
        ).buckets(exponential_buckets(0.0001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PQC_VALIDATIONS.clone()),
        Box::new(PQC_DECODE_FAILURES.clone()),
        Box::new(PQC_BLOCK_ADMISSION_REJECTIONS.clone()),
        Box::new(PQC_BLOCK_VALIDATION_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
