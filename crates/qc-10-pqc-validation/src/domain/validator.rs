//! # Transaction Validator
//!
//! Decides whether one transaction's signatures satisfy the effective
//! validation level.
//!
//! ## Decision Table
//!
//! | Level                | Classical          | Post-quantum | Hybrid                 |
//! |----------------------|--------------------|--------------|------------------------|
//! | ClassicalOnly        | classical (toggle) | reject       | reject                 |
//! | Hybrid               | classical (toggle) | pq           | both (toggle)          |
//! | HybridRequired       | reject             | reject       | both                   |
//! | QuantumResistantOnly | reject             | pq           | pq                     |
//!
//! "toggle" means the matching `accept_*_transactions` flag must also be set.
//!
//! ## Evaluation Order
//!
//! 1. Verify every present component, so results are reported even when the
//!    transaction is later rejected.
//! 2. Structural checks: algorithm metadata, hybrid composition, then the
//!    classical key must encode the declared classical scheme.
//! 3. Admission by level and toggles (`PolicyRejected`).
//! 4. Required components must have verified (`SignatureVerificationFailed`).

use super::entities::{RejectionReason, ValidationResult, VerificationKeys};
use super::errors::TransactionError;
use super::policy::{effective_level, Timestamp, ValidationLevel, ValidatorNodeConfiguration};
use super::transaction::{SignatureKind, Transaction};
use crate::ports::outbound::SignatureVerifier;

/// Components that must verify for an admitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Classical,
    PostQuantum,
    Both,
}

/// Validate a transaction at `now` under `config`.
///
/// Never fails: every rejection is reported through
/// [`ValidationResult::rejection`].
pub fn validate_transaction<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    config: &ValidatorNodeConfiguration,
    keys: &VerificationKeys,
    now: Timestamp,
    verifier: &V,
) -> ValidationResult {
    let level = effective_level(now, config);
    let kind = tx.kind();
    let (classical_valid, post_quantum_valid) = verify_components(tx, kind, keys, verifier);

    let reject = |reason| {
        ValidationResult::rejected(reason, level, kind, classical_valid, post_quantum_valid)
    };

    if let Err(err) = check_structure(tx, keys) {
        return reject(match err {
            TransactionError::AlgorithmMismatch { .. }
            | TransactionError::ClassicalKeyMismatch { .. } => RejectionReason::AlgorithmMismatch,
            _ => RejectionReason::InvalidHybridComposition,
        });
    }

    let Some(requirement) = admission(level, kind, config) else {
        return reject(RejectionReason::PolicyRejected);
    };

    let satisfied = match requirement {
        Requirement::Classical => classical_valid == Some(true),
        Requirement::PostQuantum => post_quantum_valid == Some(true),
        Requirement::Both => classical_valid == Some(true) && post_quantum_valid == Some(true),
    };

    if satisfied {
        ValidationResult::accepted(level, kind, classical_valid, post_quantum_valid)
    } else {
        reject(RejectionReason::SignatureVerificationFailed)
    }
}

/// Run the verifier over every component the transaction carries.
///
/// Empty hybrid components count as absent.
fn verify_components<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    kind: SignatureKind,
    keys: &VerificationKeys,
    verifier: &V,
) -> (Option<bool>, Option<bool>) {
    let algorithm = tx.effective_algorithm();
    let classical = |sig: &[u8]| verifier.verify_classical(&tx.data, sig, &keys.classical);
    let post_quantum =
        |sig: &[u8]| verifier.verify_post_quantum(&tx.data, sig, &keys.post_quantum, algorithm);

    match (kind, tx.hybrid()) {
        (SignatureKind::Hybrid, Some(hybrid)) => (
            Some(hybrid.classical())
                .filter(|c| !c.is_empty())
                .map(classical),
            Some(hybrid.post_quantum())
                .filter(|p| !p.is_empty())
                .map(post_quantum),
        ),
        (SignatureKind::PostQuantum, _) => (None, Some(post_quantum(tx.signature_bytes()))),
        _ => (Some(classical(tx.signature_bytes())), None),
    }
}

/// Metadata consistency, hybrid completeness, then key binding.
///
/// The verifier picks a classical scheme from the key encoding, so the key
/// must belong to the declared scheme for a classical proof to count.
fn check_structure(tx: &Transaction, keys: &VerificationKeys) -> Result<(), TransactionError> {
    tx.checked_kind()?;
    if let Some(hybrid) = tx.hybrid() {
        hybrid.check_composition()?;
    }
    if let Some(scheme) = tx.effective_algorithm().classical_component() {
        if !scheme.accepts_classical_key_len(keys.classical.len()) {
            return Err(TransactionError::ClassicalKeyMismatch {
                algorithm: scheme,
                key_len: keys.classical.len(),
            });
        }
    }
    Ok(())
}

/// Which components must verify, or `None` if the kind is not admitted.
fn admission(
    level: ValidationLevel,
    kind: SignatureKind,
    config: &ValidatorNodeConfiguration,
) -> Option<Requirement> {
    use SignatureKind as K;
    use ValidationLevel as L;

    match (level, kind) {
        (L::ClassicalOnly | L::Hybrid, K::Classical) => config
            .accept_classical_transactions
            .then_some(Requirement::Classical),
        (L::Hybrid, K::PostQuantum) => Some(Requirement::PostQuantum),
        (L::Hybrid, K::Hybrid) => config
            .accept_hybrid_transactions
            .then_some(Requirement::Both),
        (L::HybridRequired, K::Hybrid) => Some(Requirement::Both),
        (L::QuantumResistantOnly, K::PostQuantum | K::Hybrid) => Some(Requirement::PostQuantum),
        _ => None,
    }
}
