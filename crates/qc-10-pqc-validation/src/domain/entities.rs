//! # Domain Entities
//!
//! Verification inputs and validation outcomes.

use super::policy::ValidationLevel;
use super::transaction::{SignatureKind, Transaction};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// =============================================================================
// Key Material
// =============================================================================

/// Public key material of a transaction signer.
///
/// Hybrid transactions need one key per scheme. Callers that hold a single
/// key for both can use [`VerificationKeys::shared`].
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKeys {
    /// Key for the classical scheme (SEC1 secp256k1 or Ed25519).
    #[serde_as(as = "Bytes")]
    pub classical: Vec<u8>,
    /// Key for the post-quantum scheme (ML-DSA).
    #[serde_as(as = "Bytes")]
    pub post_quantum: Vec<u8>,
}

impl VerificationKeys {
    pub fn new(classical: impl Into<Vec<u8>>, post_quantum: impl Into<Vec<u8>>) -> Self {
        Self {
            classical: classical.into(),
            post_quantum: post_quantum.into(),
        }
    }

    /// Use the same key bytes for both components.
    pub fn shared(public_key: impl Into<Vec<u8>>) -> Self {
        let key = public_key.into();
        Self {
            classical: key.clone(),
            post_quantum: key,
        }
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Why a transaction was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Declared algorithm contradicts the envelope or flags.
    AlgorithmMismatch,
    /// Hybrid envelope with an empty component.
    InvalidHybridComposition,
    /// A component the effective level requires did not verify.
    SignatureVerificationFailed,
    /// Signatures may be fine but this kind is not allowed at this level.
    PolicyRejected,
}

impl RejectionReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::AlgorithmMismatch => "algorithm_mismatch",
            RejectionReason::InvalidHybridComposition => "invalid_hybrid_composition",
            RejectionReason::SignatureVerificationFailed => "signature_verification_failed",
            RejectionReason::PolicyRejected => "policy_rejected",
        }
    }
}

/// Outcome of validating one transaction.
///
/// The component flags are filled in whenever the component is present,
/// even if the transaction is rejected for a policy reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Classical component verified. `None` when absent.
    pub classical_valid: Option<bool>,
    /// Post-quantum component verified. `None` when absent.
    pub post_quantum_valid: Option<bool>,
    /// Level the decision was made under.
    pub effective_level: ValidationLevel,
    /// How the signature was classified.
    pub signature_kind: SignatureKind,
    /// Set iff `is_valid` is false.
    pub rejection: Option<RejectionReason>,
}

impl ValidationResult {
    /// Accepted transaction.
    pub fn accepted(
        effective_level: ValidationLevel,
        signature_kind: SignatureKind,
        classical_valid: Option<bool>,
        post_quantum_valid: Option<bool>,
    ) -> Self {
        Self {
            is_valid: true,
            classical_valid,
            post_quantum_valid,
            effective_level,
            signature_kind,
            rejection: None,
        }
    }

    /// Rejected transaction.
    pub fn rejected(
        reason: RejectionReason,
        effective_level: ValidationLevel,
        signature_kind: SignatureKind,
        classical_valid: Option<bool>,
        post_quantum_valid: Option<bool>,
    ) -> Self {
        Self {
            is_valid: false,
            classical_valid,
            post_quantum_valid,
            effective_level,
            signature_kind,
            rejection: Some(reason),
        }
    }
}

// =============================================================================
// Block Types
// =============================================================================

/// A transaction proposed for a block, with its signer's keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCandidate {
    pub transaction: Transaction,
    pub keys: VerificationKeys,
}

impl BlockCandidate {
    pub fn new(transaction: Transaction, keys: VerificationKeys) -> Self {
        Self { transaction, keys }
    }
}

/// Result of a block-validation pass.
#[derive(Clone, Debug)]
pub struct BlockValidationResult {
    /// Per-transaction results, in block order.
    pub results: Vec<ValidationResult>,
    /// Summed transaction footprint that passed the size gate.
    pub total_size_bytes: u64,
    /// Whether every transaction was accepted.
    pub all_valid: bool,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl BlockValidationResult {
    /// Aggregate individual results.
    pub fn from_results(results: Vec<ValidationResult>, total_size_bytes: u64) -> Self {
        let valid_count = results.iter().filter(|r| r.is_valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            total_size_bytes,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
