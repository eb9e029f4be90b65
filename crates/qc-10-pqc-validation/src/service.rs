//! # PQC Validation Service
//!
//! Application service layer that implements the `PqcValidationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`PqcValidationApi`)
//! - Uses the outbound ports (`SignatureVerifier`, `TimeSource`)
//! - Delegates decisions to the domain layer
//!
//! ## Configuration Snapshots
//!
//! The node configuration is held as an `Arc` behind a lock. Every call
//! clones the `Arc` once and works on that snapshot, so installing a new
//! configuration never affects a call already in flight.

use crate::domain::block::{order_transaction_pool, validate_block_size};
use crate::domain::codec;
use crate::domain::entities::{
    BlockCandidate, BlockValidationResult, ValidationResult, VerificationKeys,
};
use crate::domain::errors::{BlockError, ConfigError, TransactionError};
use crate::domain::policy::{effective_level, Timestamp, ValidationLevel, ValidatorNodeConfiguration};
use crate::domain::transaction::Transaction;
use crate::domain::validator;
use crate::ports::inbound::PqcValidationApi;
use crate::ports::outbound::{SignatureVerifier, SystemTimeSource, TimeSource};
use parking_lot::RwLock;
use quantum_telemetry::{
    log_tx_event, metric_inc, time_histogram, PQC_BLOCK_ADMISSION_REJECTIONS,
    PQC_BLOCK_VALIDATION_DURATION, PQC_DECODE_FAILURES, PQC_VALIDATIONS,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

const SUBSYSTEM: &str = "pqc-validation";

/// PQC Validation Service.
///
/// Owns the verifier capability, a clock and the current configuration
/// snapshot.
pub struct PqcValidationService<V: SignatureVerifier, T: TimeSource = SystemTimeSource> {
    verifier: V,
    time_source: T,
    config: RwLock<Arc<ValidatorNodeConfiguration>>,
}

impl<V: SignatureVerifier> PqcValidationService<V, SystemTimeSource> {
    /// Create a service on the system clock.
    ///
    /// # Errors
    /// `ConfigError` if `config` fails validation.
    pub fn new(verifier: V, config: ValidatorNodeConfiguration) -> Result<Self, ConfigError> {
        Self::with_time_source(verifier, SystemTimeSource, config)
    }
}

impl<V: SignatureVerifier, T: TimeSource> PqcValidationService<V, T> {
    /// Create a service with an explicit time source.
    ///
    /// # Errors
    /// `ConfigError` if `config` fails validation.
    pub fn with_time_source(
        verifier: V,
        time_source: T,
        config: ValidatorNodeConfiguration,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            base_level = %config.base_validation_level,
            require_qr = config.require_quantum_resistant_signatures,
            mandatory_date = ?config.quantum_resistant_mandatory_date,
            max_block_size_bytes = config.max_block_size_bytes,
            "PQC validation service created"
        );
        Ok(Self {
            verifier,
            time_source,
            config: RwLock::new(Arc::new(config)),
        })
    }

    fn snapshot(&self) -> Arc<ValidatorNodeConfiguration> {
        Arc::clone(&self.config.read())
    }

    fn validate_with(
        &self,
        tx: &Transaction,
        keys: &VerificationKeys,
        config: &ValidatorNodeConfiguration,
        now: Timestamp,
    ) -> ValidationResult {
        let result = validator::validate_transaction(tx, config, keys, now, &self.verifier);
        record(&result);
        result
    }
}

/// Log and count one decision.
fn record(result: &ValidationResult) {
    let outcome = result.rejection.as_ref().map_or("accepted", |r| r.as_str());
    let kind = result.signature_kind.as_str();

    metric_inc!(
        PQC_VALIDATIONS,
        &[result.effective_level.as_str(), kind, outcome]
    );

    if result.is_valid {
        log_tx_event!(
            debug,
            SUBSYSTEM,
            "Transaction accepted",
            kind,
            level = %result.effective_level
        );
    } else {
        log_tx_event!(
            debug,
            SUBSYSTEM,
            "Transaction rejected",
            kind,
            level = %result.effective_level,
            reason = outcome,
            classical_valid = ?result.classical_valid,
            post_quantum_valid = ?result.post_quantum_valid
        );
    }
}

impl<V: SignatureVerifier, T: TimeSource> PqcValidationApi for PqcValidationService<V, T> {
    fn effective_level(&self) -> ValidationLevel {
        effective_level(self.time_source.now(), &self.snapshot())
    }

    fn configuration(&self) -> Arc<ValidatorNodeConfiguration> {
        self.snapshot()
    }

    fn install_configuration(&self, config: ValidatorNodeConfiguration) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected configuration snapshot");
            return Err(e);
        }

        info!(
            base_level = %config.base_validation_level,
            require_qr = config.require_quantum_resistant_signatures,
            mandatory_date = ?config.quantum_resistant_mandatory_date,
            "Installing configuration snapshot"
        );
        *self.config.write() = Arc::new(config);
        Ok(())
    }

    fn validate_transaction(&self, tx: &Transaction, keys: &VerificationKeys) -> ValidationResult {
        self.validate_transaction_at(tx, keys, self.time_source.now())
    }

    fn validate_transaction_at(
        &self,
        tx: &Transaction,
        keys: &VerificationKeys,
        now: Timestamp,
    ) -> ValidationResult {
        let config = self.snapshot();
        self.validate_with(tx, keys, &config, now)
    }

    fn validate_encoded(
        &self,
        bytes: &[u8],
        keys: &VerificationKeys,
    ) -> Result<ValidationResult, TransactionError> {
        let tx = codec::deserialize(bytes).map_err(|e| {
            let label = match &e {
                TransactionError::UnsupportedVersion(_) => "unsupported_version",
                _ => "malformed",
            };
            metric_inc!(PQC_DECODE_FAILURES, &[label]);
            warn!(error = %e, len = bytes.len(), "Rejected undecodable transaction");
            e
        })?;

        Ok(self.validate_transaction(&tx, keys))
    }

    fn validate_block(
        &self,
        candidates: &[BlockCandidate],
    ) -> Result<BlockValidationResult, BlockError> {
        let _timer = time_histogram!(PQC_BLOCK_VALIDATION_DURATION);
        let config = self.snapshot();
        let now = self.time_source.now();

        let report = validate_block_size(candidates.iter().map(|c| &c.transaction), &config);
        if !report.ok {
            metric_inc!(PQC_BLOCK_ADMISSION_REJECTIONS);
            warn!(
                total_size_bytes = report.total_size_bytes,
                max_block_size_bytes = config.max_block_size_bytes,
                tx_count = candidates.len(),
                "Block rejected by size gate"
            );
            return Err(BlockError::BlockTooLarge {
                total_size_bytes: report.total_size_bytes,
                max_block_size_bytes: config.max_block_size_bytes,
            });
        }

        let results: Vec<ValidationResult> = candidates
            .par_iter()
            .map(|c| self.validate_with(&c.transaction, &c.keys, &config, now))
            .collect();

        let block = BlockValidationResult::from_results(results, report.total_size_bytes);
        debug!(
            tx_count = candidates.len(),
            valid = block.valid_count,
            invalid = block.invalid_count,
            total_size_bytes = block.total_size_bytes,
            "Block validation pass complete"
        );
        Ok(block)
    }

    fn order_pool(&self, pool: Vec<Transaction>) -> Vec<Transaction> {
        order_transaction_pool(pool, &self.snapshot(), self.time_source.now())
    }
}

// =============================================================================
// TESTS
// =============================================================================
