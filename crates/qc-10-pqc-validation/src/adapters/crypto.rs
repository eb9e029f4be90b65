//! # Native Signature Verifier
//!
//! Production [`SignatureVerifier`] backed by audited scheme crates.
//!
//! ## Classical
//!
//! The scheme is picked from the public key encoding:
//!
//! | Key length | Scheme          | Signature encoding     |
//! |------------|-----------------|------------------------|
//! | 32         | Ed25519         | 64 bytes               |
//! | 33 / 65    | ECDSA secp256k1 | 64-byte compact or DER |
//!
//! ECDSA verifies over the SHA-256 digest of the message. Any other key
//! length (RSA included) is unsupported and verifies `false`.
//!
//! ## Post-Quantum
//!
//! ML-DSA-44/65/87 map to the Dilithium2/3/5 parameter sets. Key and
//! signature sizes are exactly those of [`ml_dsa_sizes`]; anything else
//! verifies `false` without calling into the scheme. Hybrid tags verify their
//! ML-DSA-65 component.
//!
//! [`ml_dsa_sizes`]: crate::domain::algorithm::ml_dsa_sizes

use crate::domain::algorithm::SignatureAlgorithm;
use crate::ports::outbound::SignatureVerifier;
use ed25519_dalek::Verifier as _;
use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use tracing::trace;

/// Verifier using `ed25519-dalek`, `k256` and `pqcrypto-dilithium`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSignatureVerifier;

impl NativeSignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for NativeSignatureVerifier {
    fn verify_classical(&self, data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        match public_key.len() {
            32 => verify_ed25519(data, signature, public_key),
            33 | 65 => verify_secp256k1(data, signature, public_key),
            other => {
                trace!(key_len = other, "unsupported classical key encoding");
                false
            }
        }
    }

    fn verify_post_quantum(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> bool {
        match algorithm.post_quantum_component() {
            Some(SignatureAlgorithm::MlDsa44) => verify_dilithium2(data, signature, public_key),
            Some(SignatureAlgorithm::MlDsa65) => verify_dilithium3(data, signature, public_key),
            Some(SignatureAlgorithm::MlDsa87) => verify_dilithium5(data, signature, public_key),
            _ => {
                trace!(%algorithm, "no post-quantum component");
                false
            }
        }
    }
}

// =============================================================================
// Classical Schemes
// =============================================================================

fn verify_ed25519(data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(key_bytes) = <[u8; 32]>::try_from(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let Ok(key) = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    key.verify(data, &ed25519_dalek::Signature::from_bytes(&sig_bytes))
        .is_ok()
}

fn verify_secp256k1(data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(key) = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };

    let parsed = if signature.len() == 64 {
        k256::ecdsa::Signature::from_slice(signature)
    } else {
        k256::ecdsa::Signature::from_der(signature)
    };
    let Ok(sig) = parsed else {
        return false;
    };

    // k256 only accepts low-S; other signers may emit either form.
    let sig = sig.normalize_s().unwrap_or(sig);
    key.verify(data, &sig).is_ok()
}

// =============================================================================
// Post-Quantum Schemes
// =============================================================================

macro_rules! dilithium_verifier {
    ($name:ident, $scheme:ident) => {
        fn $name(data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
            if public_key.len() != $scheme::public_key_bytes()
                || signature.len() != $scheme::signature_bytes()
            {
                return false;
            }
            let Ok(pk) = $scheme::PublicKey::from_bytes(public_key) else {
                return false;
            };
            let Ok(sig) = $scheme::DetachedSignature::from_bytes(signature) else {
                return false;
            };
            $scheme::verify_detached_signature(&sig, data, &pk).is_ok()
        }
    };
}

dilithium_verifier!(verify_dilithium2, dilithium2);
dilithium_verifier!(verify_dilithium3, dilithium3);
dilithium_verifier!(verify_dilithium5, dilithium5);

// =============================================================================
// Test Helpers
// =============================================================================
