//! # Test Fixtures
//!
//! Real signers for every scheme the native verifier supports, plus
//! builders for signed transactions and their verification keys.

use ed25519_dalek::Signer as _;
use pqcrypto_dilithium::dilithium3;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use qc_10_pqc_validation::{
    HybridSignature, SignatureAlgorithm, Timestamp, TimeSource, Transaction, ValidationLevel,
    ValidatorNodeConfiguration, VerificationKeys,
};

/// 2026-01-01T00:00:00Z in ms.
pub const MANDATORY_DATE: Timestamp = 1_767_225_600_000;

// =============================================================================
// SIGNERS
// =============================================================================

/// ECDSA secp256k1 signer producing 64-byte compact signatures.
pub struct EcdsaSigner {
    key: k256::ecdsa::SigningKey,
}

impl EcdsaSigner {
    pub fn new() -> Self {
        Self {
            key: k256::ecdsa::SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key(&self) -> Vec<u8> {
        self.key.verifying_key().to_sec1_bytes().to_vec()
    }

    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        let sig: k256::ecdsa::Signature = self.key.sign(data);
        sig.to_bytes().to_vec()
    }
}

impl Default for EcdsaSigner {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ed25519Signer {
    key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    pub fn new() -> Self {
        Self {
            key: ed25519_dalek::SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    pub fn public_key(&self) -> Vec<u8> {
        self.key.verifying_key().to_bytes().to_vec()
    }

    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.key.sign(data).to_bytes().to_vec()
    }
}

impl Default for Ed25519Signer {
    fn default() -> Self {
        Self::new()
    }
}

/// ML-DSA-65 signer (Dilithium3 parameter set).
pub struct MlDsa65Signer {
    public: dilithium3::PublicKey,
    secret: dilithium3::SecretKey,
}

impl MlDsa65Signer {
    pub fn new() -> Self {
        let (public, secret) = dilithium3::keypair();
        Self { public, secret }
    }

    pub fn public_key(&self) -> Vec<u8> {
        self.public.as_bytes().to_vec()
    }

    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        dilithium3::detached_sign(data, &self.secret)
            .as_bytes()
            .to_vec()
    }
}

impl Default for MlDsa65Signer {
    fn default() -> Self {
        Self::new()
    }
}

/// One classical and one post-quantum identity, as held by a migrating wallet.
#[derive(Default)]
pub struct Wallet {
    pub ecdsa: EcdsaSigner,
    pub ml_dsa: MlDsa65Signer,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> VerificationKeys {
        VerificationKeys::new(self.ecdsa.public_key(), self.ml_dsa.public_key())
    }

    /// Legacy version-1 transaction signed with ECDSA.
    pub fn sign_v1(&self, data: &[u8]) -> Transaction {
        Transaction::v1(data.to_vec(), self.ecdsa.sign(data))
    }

    pub fn sign_classical(&self, data: &[u8]) -> Transaction {
        Transaction::v2(
            data.to_vec(),
            self.ecdsa.sign(data),
            SignatureAlgorithm::EcdsaSecp256k1,
        )
    }

    pub fn sign_ml_dsa(&self, data: &[u8]) -> Transaction {
        Transaction::v2(data.to_vec(), self.ml_dsa.sign(data), SignatureAlgorithm::MlDsa65)
    }

    /// ECDSA + ML-DSA-65 hybrid over the same payload.
    pub fn sign_hybrid(&self, data: &[u8]) -> Transaction {
        let signature =
            HybridSignature::from_components(&self.ecdsa.sign(data), &self.ml_dsa.sign(data));
        Transaction::v2_hybrid(
            data.to_vec(),
            signature,
            SignatureAlgorithm::HybridEcdsaMlDsa65,
        )
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

pub fn config_at(level: ValidationLevel) -> ValidatorNodeConfiguration {
    ValidatorNodeConfiguration {
        base_validation_level: level,
        ..Default::default()
    }
}

/// Hybrid today, quantum-resistant only from [`MANDATORY_DATE`].
pub fn migrating_config() -> ValidatorNodeConfiguration {
    ValidatorNodeConfiguration {
        require_quantum_resistant_signatures: true,
        quantum_resistant_mandatory_date: Some(MANDATORY_DATE),
        ..Default::default()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Deterministic payload of `len` bytes.
pub fn payload(seed: u32, len: usize) -> Vec<u8> {
    let mut data = format!("tx-{seed:08}:").into_bytes();
    data.resize(len.max(data.len()), (seed % 251) as u8);
    data
}
