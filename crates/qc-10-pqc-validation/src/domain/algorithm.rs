//! # Algorithm Catalogue
//!
//! Signature and KEM algorithm tags used across the migration, their stable
//! wire identifiers, and the FIPS 203/204 size table.
//!
//! ## Identifiers
//!
//! The string form (`ml-dsa-65`, `hybrid-rsa-mldsa65`, ...) is what crosses a
//! serialization boundary (logs, JSON, RPC). The one-byte tag is what the
//! binary transaction codec writes. Both are part of the cross-runtime
//! contract and must never be renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SIGNATURE ALGORITHMS
// =============================================================================

/// Signature algorithm declared by a version-2 transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// RSA PKCS#1 v1.5, 2048-bit modulus.
    #[serde(rename = "rsa-2048")]
    Rsa2048,
    /// ECDSA over secp256k1.
    #[default]
    #[serde(rename = "ecdsa-secp256k1")]
    EcdsaSecp256k1,
    /// Ed25519.
    #[serde(rename = "ed25519")]
    Ed25519,
    /// ML-DSA-44 (FIPS 204, NIST level 1).
    #[serde(rename = "ml-dsa-44")]
    MlDsa44,
    /// ML-DSA-65 (FIPS 204, NIST level 3).
    #[serde(rename = "ml-dsa-65")]
    MlDsa65,
    /// ML-DSA-87 (FIPS 204, NIST level 5).
    #[serde(rename = "ml-dsa-87")]
    MlDsa87,
    /// RSA-2048 combined with ML-DSA-65.
    #[serde(rename = "hybrid-rsa-mldsa65")]
    HybridRsaMlDsa65,
    /// ECDSA-secp256k1 combined with ML-DSA-65.
    #[serde(rename = "hybrid-ecdsa-mldsa65")]
    HybridEcdsaMlDsa65,
}

impl SignatureAlgorithm {
    /// Every known signature algorithm, in wire-tag order.
    pub const ALL: [SignatureAlgorithm; 8] = [
        SignatureAlgorithm::Rsa2048,
        SignatureAlgorithm::EcdsaSecp256k1,
        SignatureAlgorithm::Ed25519,
        SignatureAlgorithm::MlDsa44,
        SignatureAlgorithm::MlDsa65,
        SignatureAlgorithm::MlDsa87,
        SignatureAlgorithm::HybridRsaMlDsa65,
        SignatureAlgorithm::HybridEcdsaMlDsa65,
    ];

    /// Stable lower-case identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Rsa2048 => "rsa-2048",
            SignatureAlgorithm::EcdsaSecp256k1 => "ecdsa-secp256k1",
            SignatureAlgorithm::Ed25519 => "ed25519",
            SignatureAlgorithm::MlDsa44 => "ml-dsa-44",
            SignatureAlgorithm::MlDsa65 => "ml-dsa-65",
            SignatureAlgorithm::MlDsa87 => "ml-dsa-87",
            SignatureAlgorithm::HybridRsaMlDsa65 => "hybrid-rsa-mldsa65",
            SignatureAlgorithm::HybridEcdsaMlDsa65 => "hybrid-ecdsa-mldsa65",
        }
    }

    /// One-byte tag written by the transaction codec.
    pub const fn wire_tag(&self) -> u8 {
        match self {
            SignatureAlgorithm::Rsa2048 => 0x01,
            SignatureAlgorithm::EcdsaSecp256k1 => 0x02,
            SignatureAlgorithm::Ed25519 => 0x03,
            SignatureAlgorithm::MlDsa44 => 0x10,
            SignatureAlgorithm::MlDsa65 => 0x11,
            SignatureAlgorithm::MlDsa87 => 0x12,
            SignatureAlgorithm::HybridRsaMlDsa65 => 0x20,
            SignatureAlgorithm::HybridEcdsaMlDsa65 => 0x21,
        }
    }

    /// Inverse of [`SignatureAlgorithm::wire_tag`].
    pub fn from_wire_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.wire_tag() == tag)
    }

    /// Pre-quantum scheme with no post-quantum component.
    pub const fn is_classical(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::Rsa2048
                | SignatureAlgorithm::EcdsaSecp256k1
                | SignatureAlgorithm::Ed25519
        )
    }

    /// Pure post-quantum scheme.
    pub const fn is_post_quantum(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::MlDsa44 | SignatureAlgorithm::MlDsa65 | SignatureAlgorithm::MlDsa87
        )
    }

    /// Classical + post-quantum combination.
    pub const fn is_hybrid(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::HybridRsaMlDsa65 | SignatureAlgorithm::HybridEcdsaMlDsa65
        )
    }

    /// True for every algorithm that carries a post-quantum proof.
    pub const fn is_quantum_resistant(&self) -> bool {
        !self.is_classical()
    }

    /// The ML-DSA parameter set that verifies the post-quantum part.
    ///
    /// Returns `None` for classical algorithms.
    pub const fn post_quantum_component(&self) -> Option<SignatureAlgorithm> {
        match self {
            SignatureAlgorithm::MlDsa44 => Some(SignatureAlgorithm::MlDsa44),
            SignatureAlgorithm::MlDsa65
            | SignatureAlgorithm::HybridRsaMlDsa65
            | SignatureAlgorithm::HybridEcdsaMlDsa65 => Some(SignatureAlgorithm::MlDsa65),
            SignatureAlgorithm::MlDsa87 => Some(SignatureAlgorithm::MlDsa87),
            _ => None,
        }
    }

    /// The classical scheme inside a hybrid algorithm, or the algorithm itself
    /// when it is classical.
    pub const fn classical_component(&self) -> Option<SignatureAlgorithm> {
        match self {
            SignatureAlgorithm::Rsa2048 | SignatureAlgorithm::HybridRsaMlDsa65 => {
                Some(SignatureAlgorithm::Rsa2048)
            }
            SignatureAlgorithm::EcdsaSecp256k1 | SignatureAlgorithm::HybridEcdsaMlDsa65 => {
                Some(SignatureAlgorithm::EcdsaSecp256k1)
            }
            SignatureAlgorithm::Ed25519 => Some(SignatureAlgorithm::Ed25519),
            _ => None,
        }
    }

    /// Whether a classical public key of `len` bytes is an encoding of this
    /// scheme: 32 bytes for Ed25519, 33/65-byte SEC1 for secp256k1, the
    /// 256-byte modulus for RSA-2048.
    ///
    /// Only meaningful for classical algorithms; always `false` otherwise.
    pub const fn accepts_classical_key_len(&self, len: usize) -> bool {
        match self {
            SignatureAlgorithm::Ed25519 => len == 32,
            SignatureAlgorithm::EcdsaSecp256k1 => len == 33 || len == 65,
            SignatureAlgorithm::Rsa2048 => len == 256,
            _ => false,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an algorithm identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown algorithm identifier: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for SignatureAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

// =============================================================================
// KEM ALGORITHMS
// =============================================================================

/// Key-encapsulation mechanism (FIPS 203).
///
/// Not used by transaction validation itself; listed so that peers agree on
/// identifiers and sizes for node-to-node key exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KemAlgorithm {
    #[serde(rename = "ml-kem-512")]
    MlKem512,
    #[serde(rename = "ml-kem-768")]
    MlKem768,
    #[serde(rename = "ml-kem-1024")]
    MlKem1024,
}

impl KemAlgorithm {
    pub const ALL: [KemAlgorithm; 3] = [
        KemAlgorithm::MlKem512,
        KemAlgorithm::MlKem768,
        KemAlgorithm::MlKem1024,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            KemAlgorithm::MlKem512 => "ml-kem-512",
            KemAlgorithm::MlKem768 => "ml-kem-768",
            KemAlgorithm::MlKem1024 => "ml-kem-1024",
        }
    }
}

impl fmt::Display for KemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KemAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

// =============================================================================
// SIZE TABLE
// =============================================================================

/// ML-DSA key and signature sizes `(public_key, private_key, signature)`.
///
/// These are the byte sizes produced by the reference implementation that
/// other runtimes on the chain verify against. Do not change them.
pub const fn ml_dsa_sizes(algorithm: SignatureAlgorithm) -> Option<(usize, usize, usize)> {
    match algorithm {
        SignatureAlgorithm::MlDsa44 => Some((1312, 2528, 2420)),
        SignatureAlgorithm::MlDsa65 => Some((1952, 4000, 3293)),
        SignatureAlgorithm::MlDsa87 => Some((2592, 4864, 4595)),
        _ => None,
    }
}

/// ML-KEM sizes `(public_key, private_key, ciphertext)`.
pub const fn ml_kem_sizes(algorithm: KemAlgorithm) -> (usize, usize, usize) {
    match algorithm {
        KemAlgorithm::MlKem512 => (800, 1632, 768),
        KemAlgorithm::MlKem768 => (1184, 2400, 1088),
        KemAlgorithm::MlKem1024 => (1568, 3168, 1568),
    }
}

/// ML-KEM shared secret length, identical for every parameter set.
pub const ML_KEM_SHARED_SECRET_BYTES: usize = 32;

/// Primitive family of a catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Signature,
    Kem,
}

/// Catalogue entry describing one supported algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub kind: AlgorithmKind,
    pub security_level: &'static str,
    pub public_key_size: usize,
    pub private_key_size: usize,
    /// Signature size for signature schemes, ciphertext size for KEMs.
    pub output_size: usize,
    pub quantum_resistant: bool,
    pub nist_status: &'static str,
}

/// Algorithms this node advertises.
///
/// Post-quantum algorithms are always listed. Classical schemes are
/// considered deprecated and only listed when `include_deprecated` is set.
pub fn supported_algorithms(include_deprecated: bool) -> Vec<AlgorithmInfo> {
    let mut algorithms = Vec::with_capacity(9);

    for (alg, level) in [
        (SignatureAlgorithm::MlDsa44, "NIST Level 1"),
        (SignatureAlgorithm::MlDsa65, "NIST Level 3"),
        (SignatureAlgorithm::MlDsa87, "NIST Level 5"),
    ] {
        if let Some((pk, sk, sig)) = ml_dsa_sizes(alg) {
            algorithms.push(AlgorithmInfo {
                name: alg.as_str(),
                kind: AlgorithmKind::Signature,
                security_level: level,
                public_key_size: pk,
                private_key_size: sk,
                output_size: sig,
                quantum_resistant: true,
                nist_status: "FIPS 204",
            });
        }
    }

    for (alg, level) in [
        (KemAlgorithm::MlKem512, "NIST Level 1"),
        (KemAlgorithm::MlKem768, "NIST Level 3"),
        (KemAlgorithm::MlKem1024, "NIST Level 5"),
    ] {
        let (pk, sk, ct) = ml_kem_sizes(alg);
        algorithms.push(AlgorithmInfo {
            name: alg.as_str(),
            kind: AlgorithmKind::Kem,
            security_level: level,
            public_key_size: pk,
            private_key_size: sk,
            output_size: ct,
            quantum_resistant: true,
            nist_status: "FIPS 203",
        });
    }

    if include_deprecated {
        algorithms.push(AlgorithmInfo {
            name: SignatureAlgorithm::Rsa2048.as_str(),
            kind: AlgorithmKind::Signature,
            security_level: "classical ~112-bit",
            public_key_size: 256,
            private_key_size: 1190,
            output_size: 256,
            quantum_resistant: false,
            nist_status: "classical",
        });
        algorithms.push(AlgorithmInfo {
            name: SignatureAlgorithm::EcdsaSecp256k1.as_str(),
            kind: AlgorithmKind::Signature,
            security_level: "classical ~128-bit",
            public_key_size: 33,
            private_key_size: 32,
            output_size: 64,
            quantum_resistant: false,
            nist_status: "classical",
        });
        algorithms.push(AlgorithmInfo {
            name: SignatureAlgorithm::Ed25519.as_str(),
            kind: AlgorithmKind::Signature,
            security_level: "classical ~128-bit",
            public_key_size: 32,
            private_key_size: 32,
            output_size: 64,
            quantum_resistant: false,
            nist_status: "classical",
        });
    }

    algorithms
}
