//! Fuzz target for the native signature verifier.
//!
//! Malformed keys and signatures must verify `false`, deterministically,
//! without panicking inside any scheme crate.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-10-pqc-validation
//! cargo +nightly fuzz run fuzz_native_verify
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_10_pqc_validation::{NativeSignatureVerifier, SignatureAlgorithm, SignatureVerifier};

/// Fuzz input structure for verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    signature: Vec<u8>,
    public_key: Vec<u8>,
    /// Index into `SignatureAlgorithm::ALL`
    algorithm: u8,
}

fuzz_target!(|input: FuzzInput| {
    let verifier = NativeSignatureVerifier;
    let algorithm =
        SignatureAlgorithm::ALL[input.algorithm as usize % SignatureAlgorithm::ALL.len()];

    let classical = verifier.verify_classical(&input.data, &input.signature, &input.public_key);
    let post_quantum =
        verifier.verify_post_quantum(&input.data, &input.signature, &input.public_key, algorithm);

    // Results are deterministic
    assert_eq!(
        classical,
        verifier.verify_classical(&input.data, &input.signature, &input.public_key)
    );
    assert_eq!(
        post_quantum,
        verifier.verify_post_quantum(&input.data, &input.signature, &input.public_key, algorithm)
    );
});
