//! Fuzz target for the transaction wire codec.
//!
//! Arbitrary bytes must either decode into a transaction that re-encodes to
//! the same bytes, or fail with an error. Never panic.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-10-pqc-validation
//! cargo +nightly fuzz run fuzz_codec_deserialize
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_10_pqc_validation::{deserialize, serialize};

fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = deserialize(data) {
        // Decoding is strict, so a successful decode is canonical and
        // always within the field cap.
        assert_eq!(serialize(&tx).as_deref(), Ok(data));

        // Hybrid components always add up to the combined signature.
        if let Some(hybrid) = tx.hybrid() {
            assert_eq!(
                hybrid.classical().len() + hybrid.post_quantum().len(),
                tx.signature_bytes().len()
            );
        }
    }
});
