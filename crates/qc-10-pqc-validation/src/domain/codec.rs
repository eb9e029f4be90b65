//! # Transaction Codec
//!
//! Version-tagged binary encoding of a transaction's signature-bearing fields.
//!
//! ## Layout
//!
//! All lengths are fixed-width big-endian `u32`.
//!
//! ```text
//! v1: version(1) | data_len | data | sig_len | sig
//! v2: version(2) | data_len | data | sig_len | sig
//!     | algorithm_tag(u8) | flags(u8) | [classical_len if hybrid]
//!
//! flags: bit 0 = hybrid, bit 1 = quantum resistant, bits 2..7 reserved (zero)
//! ```
//!
//! Decoding is all-or-nothing: any truncation, trailing byte, unknown tag or
//! reserved bit fails the whole call.

use super::algorithm::SignatureAlgorithm;
use super::errors::TransactionError;
use super::transaction::{HybridSignature, SignatureEnvelope, Transaction, TransactionVersion};

/// Largest accepted `data` or `signature` field. Checked before allocating.
pub const MAX_FIELD_BYTES: usize = 16 * 1024 * 1024;

const FLAG_HYBRID: u8 = 0b0000_0001;
const FLAG_QUANTUM_RESISTANT: u8 = 0b0000_0010;
const FLAGS_RESERVED: u8 = !(FLAG_HYBRID | FLAG_QUANTUM_RESISTANT);

// =============================================================================
// ENCODING
// =============================================================================

/// Encode a transaction.
///
/// Version 1 writes only data and signature; every v2-only field is dropped.
///
/// # Errors
/// `MalformedTransaction` if `data` or the signature is longer than
/// [`MAX_FIELD_BYTES`]; such bytes would never decode.
pub fn serialize(tx: &Transaction) -> Result<Vec<u8>, TransactionError> {
    let signature = tx.signature_bytes();
    let data_len = field_len(tx.data.len(), "data")?;
    let sig_len = field_len(signature.len(), "signature")?;

    let mut out = Vec::with_capacity(1 + 4 + tx.data.len() + 4 + signature.len() + 6);

    out.push(tx.version.as_byte());
    out.extend_from_slice(&data_len.to_be_bytes());
    out.extend_from_slice(&tx.data);
    out.extend_from_slice(&sig_len.to_be_bytes());
    out.extend_from_slice(signature);

    if tx.version == TransactionVersion::V2 {
        out.push(tx.signature_algorithm.wire_tag());

        let mut flags = 0u8;
        if tx.is_hybrid() {
            flags |= FLAG_HYBRID;
        }
        if tx.quantum_resistant {
            flags |= FLAG_QUANTUM_RESISTANT;
        }
        out.push(flags);

        if let Some(hybrid) = tx.hybrid() {
            // Bounded by the signature length checked above.
            let classical_len = field_len(hybrid.classical_len(), "classical_len")?;
            out.extend_from_slice(&classical_len.to_be_bytes());
        }
    }

    Ok(out)
}

/// Length prefix for a field, under the same cap the decoder enforces.
fn field_len(len: usize, what: &str) -> Result<u32, TransactionError> {
    if len > MAX_FIELD_BYTES {
        return Err(oversized(what, len));
    }
    u32::try_from(len).map_err(|_| oversized(what, len))
}

fn oversized(what: &str, len: usize) -> TransactionError {
    TransactionError::MalformedTransaction(format!("{what} length {len} exceeds {MAX_FIELD_BYTES}"))
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a transaction.
///
/// # Errors
/// - `UnsupportedVersion` if the leading byte is not 1 or 2
/// - `MalformedTransaction` for any other structural problem
pub fn deserialize(bytes: &[u8]) -> Result<Transaction, TransactionError> {
    let mut reader = Reader::new(bytes);

    let version = TransactionVersion::try_from(reader.u8("version")?)?;
    let data = reader.field("data")?.to_vec();
    let signature = reader.field("signature")?.to_vec();

    let tx = match version {
        TransactionVersion::V1 => Transaction::v1(data, signature),
        TransactionVersion::V2 => {
            let tag = reader.u8("algorithm")?;
            let algorithm = SignatureAlgorithm::from_wire_tag(tag).ok_or_else(|| {
                TransactionError::MalformedTransaction(format!("unknown algorithm tag 0x{tag:02x}"))
            })?;

            let flags = reader.u8("flags")?;
            if flags & FLAGS_RESERVED != 0 {
                return Err(TransactionError::MalformedTransaction(format!(
                    "reserved flag bits set: 0b{flags:08b}"
                )));
            }

            let envelope = if flags & FLAG_HYBRID != 0 {
                let classical_len = reader.u32("classical_len")? as usize;
                let hybrid = HybridSignature::from_parts(signature, classical_len).map_err(|_| {
                    TransactionError::MalformedTransaction(format!(
                        "hybrid split {classical_len} past end of signature"
                    ))
                })?;
                SignatureEnvelope::Hybrid(hybrid)
            } else {
                SignatureEnvelope::Single(signature)
            };

            Transaction {
                version,
                data,
                signature: envelope,
                signature_algorithm: algorithm,
                quantum_resistant: flags & FLAG_QUANTUM_RESISTANT != 0,
            }
        }
    };

    if reader.remaining() != 0 {
        return Err(TransactionError::MalformedTransaction(format!(
            "{} trailing bytes",
            reader.remaining()
        )));
    }

    Ok(tx)
}

/// Cursor over the input that fails closed on truncation.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], TransactionError> {
        if self.remaining() < len {
            return Err(TransactionError::MalformedTransaction(format!(
                "truncated {what}: need {len} bytes, have {}",
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u8(&mut self, what: &str) -> Result<u8, TransactionError> {
        Ok(self.take(1, what)?[0])
    }

    fn u32(&mut self, what: &str) -> Result<u32, TransactionError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn field(&mut self, what: &str) -> Result<&'a [u8], TransactionError> {
        let len = self.u32(what)? as usize;
        if len > MAX_FIELD_BYTES {
            return Err(oversized(what, len));
        }
        self.take(len, what)
    }
}
