//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{BlockCandidate, BlockValidationResult, ValidationResult, VerificationKeys};
use crate::domain::errors::{BlockError, ConfigError, TransactionError};
use crate::domain::policy::{Timestamp, ValidationLevel, ValidatorNodeConfiguration};
use crate::domain::transaction::Transaction;
use std::sync::Arc;

/// Primary PQC Validation API.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call reads one
/// configuration snapshot for its whole duration.
pub trait PqcValidationApi: Send + Sync {
    // =========================================================================
    // Policy
    // =========================================================================

    /// Level in force right now.
    fn effective_level(&self) -> ValidationLevel;

    /// Currently installed configuration snapshot.
    fn configuration(&self) -> Arc<ValidatorNodeConfiguration>;

    /// Validate and atomically install a new configuration snapshot.
    ///
    /// Calls already in flight keep the snapshot they started with.
    fn install_configuration(&self, config: ValidatorNodeConfiguration) -> Result<(), ConfigError>;

    // =========================================================================
    // Transaction Validation
    // =========================================================================

    /// Validate a transaction against the current time.
    fn validate_transaction(&self, tx: &Transaction, keys: &VerificationKeys) -> ValidationResult;

    /// Validate a transaction as of `now`.
    fn validate_transaction_at(
        &self,
        tx: &Transaction,
        keys: &VerificationKeys,
        now: Timestamp,
    ) -> ValidationResult;

    /// Decode wire bytes and validate the result.
    ///
    /// # Errors
    /// Malformed or unsupported input fails closed before any verification.
    fn validate_encoded(
        &self,
        bytes: &[u8],
        keys: &VerificationKeys,
    ) -> Result<ValidationResult, TransactionError>;

    // =========================================================================
    // Block Operations
    // =========================================================================

    /// Size-gate then validate every candidate of a block.
    ///
    /// # Errors
    /// `BlockTooLarge` if the aggregate footprint exceeds the cap. No
    /// signature is verified in that case.
    fn validate_block(&self, candidates: &[BlockCandidate]) -> Result<BlockValidationResult, BlockError>;

    /// Order a transaction pool for block assembly.
    fn order_pool(&self, pool: Vec<Transaction>) -> Vec<Transaction>;
}
