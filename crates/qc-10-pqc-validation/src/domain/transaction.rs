//! # Transaction Entity
//!
//! The signature-bearing view of a transaction as the validator sees it.
//!
//! ## Hybrid Composition
//!
//! A hybrid signature travels on the wire as one buffer,
//! `classical || post_quantum`. In memory it is a [`HybridSignature`] holding
//! that buffer plus the split point, checked once on construction. The two
//! components are slices of the buffer, so their lengths always add up to the
//! combined length and can never drift apart.

use super::algorithm::SignatureAlgorithm;
use super::errors::TransactionError;
use serde::{Deserialize, Serialize};

// =============================================================================
// VERSION
// =============================================================================

/// Transaction layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionVersion {
    /// Pre-migration layout. Always classical, never hybrid.
    V1,
    /// Migration-era layout with algorithm metadata and hybrid support.
    V2,
}

impl TransactionVersion {
    pub const fn as_byte(&self) -> u8 {
        match self {
            TransactionVersion::V1 => 1,
            TransactionVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for TransactionVersion {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TransactionVersion::V1),
            2 => Ok(TransactionVersion::V2),
            other => Err(TransactionError::UnsupportedVersion(other)),
        }
    }
}

// =============================================================================
// SIGNATURE ENVELOPE
// =============================================================================

/// Combined classical + post-quantum signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HybridSignatureParts", into = "HybridSignatureParts")]
pub struct HybridSignature {
    combined: Vec<u8>,
    classical_len: usize,
}

/// Unchecked serde form of [`HybridSignature`].
#[derive(Serialize, Deserialize)]
struct HybridSignatureParts {
    combined: Vec<u8>,
    classical_len: usize,
}

impl TryFrom<HybridSignatureParts> for HybridSignature {
    type Error = TransactionError;

    fn try_from(parts: HybridSignatureParts) -> Result<Self, Self::Error> {
        HybridSignature::from_parts(parts.combined, parts.classical_len)
    }
}

impl From<HybridSignature> for HybridSignatureParts {
    fn from(hybrid: HybridSignature) -> Self {
        Self {
            combined: hybrid.combined,
            classical_len: hybrid.classical_len,
        }
    }
}

impl HybridSignature {
    /// Concatenate the two components in the fixed classical-first order.
    pub fn from_components(classical: &[u8], post_quantum: &[u8]) -> Self {
        let mut combined = Vec::with_capacity(classical.len() + post_quantum.len());
        combined.extend_from_slice(classical);
        combined.extend_from_slice(post_quantum);
        Self {
            combined,
            classical_len: classical.len(),
        }
    }

    /// Rebuild from a combined buffer and the length of its classical prefix.
    ///
    /// # Errors
    /// `InvalidHybridComposition` if the split point lies past the buffer.
    pub fn from_parts(combined: Vec<u8>, classical_len: usize) -> Result<Self, TransactionError> {
        if classical_len > combined.len() {
            return Err(TransactionError::InvalidHybridComposition {
                classical_len,
                pq_len: 0,
                signature_len: combined.len(),
            });
        }
        Ok(Self {
            combined,
            classical_len,
        })
    }

    pub fn combined(&self) -> &[u8] {
        &self.combined
    }

    pub fn classical(&self) -> &[u8] {
        &self.combined[..self.classical_len]
    }

    pub fn post_quantum(&self) -> &[u8] {
        &self.combined[self.classical_len..]
    }

    pub fn classical_len(&self) -> usize {
        self.classical_len
    }

    /// Both components are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.classical().is_empty() && !self.post_quantum().is_empty()
    }

    /// Check the composition invariant.
    ///
    /// # Errors
    /// `InvalidHybridComposition` when either component is empty.
    pub fn check_composition(&self) -> Result<(), TransactionError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(TransactionError::InvalidHybridComposition {
                classical_len: self.classical().len(),
                pq_len: self.post_quantum().len(),
                signature_len: self.combined.len(),
            })
        }
    }
}

/// Raw signature bytes of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureEnvelope {
    /// One signature produced by a single scheme.
    Single(Vec<u8>),
    /// Classical and post-quantum components.
    Hybrid(HybridSignature),
}

impl SignatureEnvelope {
    /// The full signature buffer as transmitted.
    pub fn bytes(&self) -> &[u8] {
        match self {
            SignatureEnvelope::Single(bytes) => bytes,
            SignatureEnvelope::Hybrid(hybrid) => hybrid.combined(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

// =============================================================================
// TRANSACTION
// =============================================================================

/// How a transaction's signature is composed, after version rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Classical,
    PostQuantum,
    Hybrid,
}

impl SignatureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Classical => "classical",
            SignatureKind::PostQuantum => "post_quantum",
            SignatureKind::Hybrid => "hybrid",
        }
    }
}

/// A transaction as handed to the validator by upstream wallet/RPC code.
///
/// The validator only ever borrows a transaction; it never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Layout version.
    pub version: TransactionVersion,
    /// Opaque payload that was signed.
    pub data: Vec<u8>,
    /// Signature bytes, single or hybrid.
    pub signature: SignatureEnvelope,
    /// Declared algorithm. Ignored for version 1.
    pub signature_algorithm: SignatureAlgorithm,
    /// Declared quantum resistance. Ignored for version 1.
    pub quantum_resistant: bool,
}

impl Transaction {
    /// Pre-migration classical transaction.
    pub fn v1(data: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            version: TransactionVersion::V1,
            data,
            signature: SignatureEnvelope::Single(signature),
            signature_algorithm: SignatureAlgorithm::default(),
            quantum_resistant: false,
        }
    }

    /// Version-2 transaction signed by a single scheme.
    ///
    /// The quantum-resistance flag is taken from the algorithm.
    pub fn v2(data: Vec<u8>, signature: Vec<u8>, algorithm: SignatureAlgorithm) -> Self {
        Self {
            version: TransactionVersion::V2,
            data,
            signature: SignatureEnvelope::Single(signature),
            signature_algorithm: algorithm,
            quantum_resistant: algorithm.is_quantum_resistant(),
        }
    }

    /// Version-2 hybrid transaction.
    pub fn v2_hybrid(data: Vec<u8>, signature: HybridSignature, algorithm: SignatureAlgorithm) -> Self {
        Self {
            version: TransactionVersion::V2,
            data,
            signature: SignatureEnvelope::Hybrid(signature),
            signature_algorithm: algorithm,
            quantum_resistant: true,
        }
    }

    /// Full signature buffer.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature.bytes()
    }

    /// True only for version-2 transactions carrying a hybrid envelope.
    pub fn is_hybrid(&self) -> bool {
        self.version == TransactionVersion::V2
            && matches!(self.signature, SignatureEnvelope::Hybrid(_))
    }

    /// True only for version-2 transactions declaring quantum resistance.
    pub fn is_quantum_resistant(&self) -> bool {
        self.version == TransactionVersion::V2 && self.quantum_resistant
    }

    /// Hybrid components, if this is a hybrid transaction.
    pub fn hybrid(&self) -> Option<&HybridSignature> {
        match (&self.signature, self.version) {
            (SignatureEnvelope::Hybrid(hybrid), TransactionVersion::V2) => Some(hybrid),
            _ => None,
        }
    }

    pub fn classical_signature(&self) -> Option<&[u8]> {
        self.hybrid().map(HybridSignature::classical)
    }

    pub fn pq_signature(&self) -> Option<&[u8]> {
        self.hybrid().map(HybridSignature::post_quantum)
    }

    /// Algorithm that actually applies: version 1 is always ECDSA-era
    /// classical regardless of the stored tag.
    pub fn effective_algorithm(&self) -> SignatureAlgorithm {
        match self.version {
            TransactionVersion::V1 => SignatureAlgorithm::default(),
            TransactionVersion::V2 => self.signature_algorithm,
        }
    }

    /// Classify the signature without checking metadata consistency.
    pub fn kind(&self) -> SignatureKind {
        if self.is_hybrid() {
            SignatureKind::Hybrid
        } else if self.is_quantum_resistant() {
            SignatureKind::PostQuantum
        } else {
            SignatureKind::Classical
        }
    }

    /// Classify the signature and check that the declared algorithm agrees
    /// with the envelope and flags.
    ///
    /// # Errors
    /// `AlgorithmMismatch` when a version-2 transaction's algorithm family
    /// contradicts its hybrid or quantum-resistance flags.
    pub fn checked_kind(&self) -> Result<SignatureKind, TransactionError> {
        let kind = self.kind();
        if self.version == TransactionVersion::V1 {
            return Ok(kind);
        }

        let alg = self.signature_algorithm;
        let consistent = match kind {
            SignatureKind::Hybrid => alg.is_hybrid(),
            SignatureKind::PostQuantum => alg.is_post_quantum(),
            SignatureKind::Classical => alg.is_classical(),
        } && alg.is_quantum_resistant() == self.quantum_resistant;

        if consistent {
            Ok(kind)
        } else {
            Err(TransactionError::AlgorithmMismatch {
                algorithm: alg,
                is_hybrid: self.is_hybrid(),
                is_quantum_resistant: self.quantum_resistant,
            })
        }
    }

    /// Bytes this transaction contributes to a block: payload plus signature.
    pub fn footprint(&self) -> u64 {
        (self.data.len() as u64).saturating_add(self.signature.len() as u64)
    }
}
