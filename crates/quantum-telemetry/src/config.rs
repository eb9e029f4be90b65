//! Telemetry configuration from environment variables.

use std::env;

const DEFAULT_SERVICE_NAME: &str = "quantum-chain";
const DEFAULT_SUBSYSTEM_ID: &str = "00";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for the log subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Subsystem identifier, `10` for PQC validation
    pub subsystem_id: String,

    /// Fallback filter when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,

    /// Install a formatting layer at all; `false` keeps only the filter
    pub console_output: bool,

    /// JSON lines instead of the pretty formatter
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            subsystem_id: DEFAULT_SUBSYSTEM_ID.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_SERVICE_NAME`: Service name (default: quantum-chain)
    /// - `QC_SUBSYSTEM_ID`: Subsystem ID (default: 00)
    /// - `QC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `QC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `QC_JSON_LOGS`: Enable JSON logs (default: false)
    ///
    /// Flags accept `1/0`, `true/false` and `yes/no`. Anything else keeps
    /// the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. [`from_env`](Self::from_env) uses
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default)
        };

        Self {
            service_name: lookup("QC_SERVICE_NAME").unwrap_or(defaults.service_name),
            subsystem_id: lookup("QC_SUBSYSTEM_ID").unwrap_or(defaults.subsystem_id),
            log_level: lookup("QC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: flag("QC_CONSOLE_OUTPUT", defaults.console_output),
            json_logs: flag("QC_JSON_LOGS", defaults.json_logs),
        }
    }

    /// Create configuration for a specific subsystem.
    ///
    /// The service name becomes `qc-<id>-<name>`, overriding `QC_SERVICE_NAME`.
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        Self {
            subsystem_id: subsystem_id.to_string(),
            service_name: format!("qc-{subsystem_id}-{subsystem_name}"),
            ..Self::from_env()
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
