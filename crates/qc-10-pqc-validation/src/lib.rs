//! # PQC Validation Subsystem (QC-10)
//!
//! Signature validation for the classical to post-quantum migration.
//!
//! Every transaction is checked against the node's effective validation
//! level: classical, ML-DSA (FIPS 204) or hybrid signatures are accepted or
//! rejected according to a time-driven policy, and a transaction whose
//! signatures do not match its declared metadata is never accepted.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Codec, policy and decision logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//! - **Adapters Layer** (`adapters/`): Native signature verifier
//!
//! ## Migration Levels
//!
//! - `ClassicalOnly` → `Hybrid` → `HybridRequired` → `QuantumResistantOnly`
//! - With a mandatory date configured, the level switches to
//!   `QuantumResistantOnly` once that date is reached.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::crypto::NativeSignatureVerifier;
pub use domain::algorithm::{
    supported_algorithms, AlgorithmInfo, AlgorithmKind, KemAlgorithm, SignatureAlgorithm,
    UnknownAlgorithm,
};
pub use domain::block::{order_transaction_pool, validate_block_size, BlockSizeReport};
pub use domain::codec::{deserialize, serialize, MAX_FIELD_BYTES};
pub use domain::entities::{
    BlockCandidate, BlockValidationResult, RejectionReason, ValidationResult, VerificationKeys,
};
pub use domain::errors::{BlockError, ConfigError, TransactionError};
pub use domain::policy::{
    effective_level, is_past_mandatory_date, Timestamp, ValidationLevel,
    ValidatorNodeConfiguration,
};
pub use domain::transaction::{
    HybridSignature, SignatureEnvelope, SignatureKind, Transaction, TransactionVersion,
};
pub use domain::validator::validate_transaction;
pub use ports::inbound::PqcValidationApi;
pub use ports::outbound::{SignatureVerifier, SystemTimeSource, TimeSource};
pub use service::PqcValidationService;
