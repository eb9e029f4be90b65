//! # Validation Policy
//!
//! Node configuration and the time-driven effective validation level.
//!
//! ## State Machine
//!
//! ```text
//! require_qr = false                 -> base_validation_level
//! require_qr = true,  now <  date    -> base_validation_level
//! require_qr = true,  now >= date    -> QuantumResistantOnly
//! ```
//!
//! The level is recomputed from `(now, config)` on every call. Nothing is
//! cached, so installing a new configuration takes effect immediately.

use super::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Default block cap: 10 MiB.
pub const DEFAULT_MAX_BLOCK_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Which signature kinds a validator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    /// Pre-migration: classical signatures only.
    ClassicalOnly,
    /// Migration: classical, post-quantum and hybrid all accepted.
    #[default]
    Hybrid,
    /// Only hybrid signatures with both components valid.
    HybridRequired,
    /// Post-migration: a valid post-quantum component is mandatory.
    QuantumResistantOnly,
}

impl ValidationLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::ClassicalOnly => "classical_only",
            ValidationLevel::Hybrid => "hybrid",
            ValidationLevel::HybridRequired => "hybrid_required",
            ValidationLevel::QuantumResistantOnly => "quantum_resistant_only",
        }
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable validator policy snapshot.
///
/// Missing fields fall back to [`Default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorNodeConfiguration {
    /// Switch to `QuantumResistantOnly` once the mandatory date passes.
    pub require_quantum_resistant_signatures: bool,
    /// Cutover instant, ms since the Unix epoch. Only read when the
    /// requirement flag is set.
    pub quantum_resistant_mandatory_date: Option<Timestamp>,
    /// Level in force before the cutover.
    pub base_validation_level: ValidationLevel,
    pub accept_classical_transactions: bool,
    pub accept_hybrid_transactions: bool,
    /// Upper bound on the summed transaction footprint of a block.
    pub max_block_size_bytes: u64,
}

impl Default for ValidatorNodeConfiguration {
    fn default() -> Self {
        Self {
            require_quantum_resistant_signatures: false,
            quantum_resistant_mandatory_date: None,
            base_validation_level: ValidationLevel::Hybrid,
            accept_classical_transactions: true,
            accept_hybrid_transactions: true,
            max_block_size_bytes: DEFAULT_MAX_BLOCK_SIZE_BYTES,
        }
    }
}

impl ValidatorNodeConfiguration {
    /// Check the snapshot before it is installed.
    ///
    /// # Errors
    /// `InvalidMaxBlockSize` if `max_block_size_bytes` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_block_size_bytes == 0 {
            return Err(ConfigError::InvalidMaxBlockSize);
        }
        Ok(())
    }
}

/// True once the quantum-resistance requirement is active and `now` has
/// reached the mandatory date.
///
/// A requirement without a date never activates.
pub fn is_past_mandatory_date(now: Timestamp, config: &ValidatorNodeConfiguration) -> bool {
    config.require_quantum_resistant_signatures
        && config
            .quantum_resistant_mandatory_date
            .is_some_and(|date| now >= date)
}

/// Level in force at `now`.
pub fn effective_level(now: Timestamp, config: &ValidatorNodeConfiguration) -> ValidationLevel {
    if is_past_mandatory_date(now, config) {
        ValidationLevel::QuantumResistantOnly
    } else {
        config.base_validation_level
    }
}
