//! # Validation Errors
//!
//! Error types for decoding, configuration and block admission.
//!
//! Cryptographic verification failures and policy rejections are NOT errors:
//! they are reported through `ValidationResult` so that a rejected
//! transaction still tells the caller which component failed.

use super::algorithm::SignatureAlgorithm;
use thiserror::Error;

/// Errors raised while decoding or structurally checking a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// The byte stream is truncated, has trailing bytes, or carries an
    /// unknown algorithm tag or reserved flag bits.
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),

    /// The leading version byte is not 1 or 2.
    #[error("Unsupported transaction version: {0}")]
    UnsupportedVersion(u8),

    /// Hybrid components do not add up to the combined signature, or one of
    /// them is empty.
    #[error(
        "Invalid hybrid composition: classical {classical_len} + post-quantum {pq_len} bytes, signature {signature_len} bytes"
    )]
    InvalidHybridComposition {
        classical_len: usize,
        pq_len: usize,
        signature_len: usize,
    },

    /// The declared algorithm disagrees with the hybrid / quantum-resistant
    /// flags of the transaction.
    #[error(
        "Algorithm {algorithm} does not match flags (hybrid={is_hybrid}, quantum_resistant={is_quantum_resistant})"
    )]
    AlgorithmMismatch {
        algorithm: SignatureAlgorithm,
        is_hybrid: bool,
        is_quantum_resistant: bool,
    },

    /// The classical public key is not an encoding of the declared classical
    /// scheme, so its proof cannot be the one the metadata names.
    #[error("Classical key of {key_len} bytes is not a {algorithm} key")]
    ClassicalKeyMismatch {
        algorithm: SignatureAlgorithm,
        key_len: usize,
    },
}

/// Errors in a validator node configuration snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero block cap would reject every block.
    #[error("max_block_size_bytes must be greater than zero")]
    InvalidMaxBlockSize,
}

/// Errors that abort a whole block-validation pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockError {
    /// The aggregate transaction footprint exceeds the configured cap.
    #[error("Block too large: {total_size_bytes} bytes exceeds limit of {max_block_size_bytes}")]
    BlockTooLarge {
        total_size_bytes: u64,
        max_block_size_bytes: u64,
    },
}
