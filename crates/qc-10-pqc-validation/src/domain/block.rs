//! # Block Admission and Pool Ordering
//!
//! Two cheap passes over a candidate transaction set that run independently
//! of signature verification:
//!
//! - [`validate_block_size`]: aggregate size gate, run before any
//!   verification work is spent on a block.
//! - [`order_transaction_pool`]: after the migration deadline,
//!   quantum-resistant transactions move to the front.

use super::policy::{is_past_mandatory_date, Timestamp, ValidatorNodeConfiguration};
use super::transaction::{SignatureKind, Transaction};
use serde::{Deserialize, Serialize};

/// Outcome of the block size gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSizeReport {
    /// `total_size_bytes <= max_block_size_bytes`.
    pub ok: bool,
    /// Sum of every transaction's payload and signature length.
    pub total_size_bytes: u64,
}

/// Sum transaction footprints and compare against the configured cap.
///
/// The sum saturates, so an absurd candidate set reports `u64::MAX` rather
/// than wrapping below the cap.
pub fn validate_block_size<'a, I>(transactions: I, config: &ValidatorNodeConfiguration) -> BlockSizeReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let total_size_bytes = transactions
        .into_iter()
        .fold(0u64, |acc, tx| acc.saturating_add(tx.footprint()));

    BlockSizeReport {
        ok: total_size_bytes <= config.max_block_size_bytes,
        total_size_bytes,
    }
}

/// Order a pool for block assembly.
///
/// Past the mandatory date this is a stable partition with quantum-resistant
/// transactions first. Relative order inside each group is preserved.
/// Before the deadline the pool is returned unchanged.
///
/// Priority follows [`Transaction::checked_kind`], not the raw flag: a
/// transaction whose flag contradicts its declared algorithm stays with the
/// classical group.
pub fn order_transaction_pool(
    pool: Vec<Transaction>,
    config: &ValidatorNodeConfiguration,
    now: Timestamp,
) -> Vec<Transaction> {
    if !is_past_mandatory_date(now, config) {
        return pool;
    }

    let (mut ordered, classical): (Vec<_>, Vec<_>) =
        pool.into_iter().partition(has_quantum_resistant_kind);
    ordered.extend(classical);
    ordered
}

fn has_quantum_resistant_kind(tx: &Transaction) -> bool {
    matches!(
        tx.checked_kind(),
        Ok(SignatureKind::PostQuantum | SignatureKind::Hybrid)
    )
}
