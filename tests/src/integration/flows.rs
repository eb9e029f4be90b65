//! # Integration Test Flows
//!
//! Real keys, real signatures, the production verifier:
//!
//! 1. **Migration timeline**: classical accepted before the mandatory date,
//!    refused after it, post-quantum accepted throughout.
//! 2. **Hybrid**: both components verified under `HybridRequired`, only the
//!    ML-DSA half required once quantum resistance is mandatory.
//! 3. **Wire path**: encoded transactions decoded and validated by the service.
//! 4. **Block assembly**: size gate, parallel validation and pool ordering.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use qc_10_pqc_validation::{
        serialize, supported_algorithms, AlgorithmKind, BlockCandidate, BlockError,
        HybridSignature, NativeSignatureVerifier, PqcValidationApi, PqcValidationService,
        RejectionReason, SignatureAlgorithm, SignatureKind, Transaction, TransactionError,
        ValidationLevel, ValidatorNodeConfiguration, VerificationKeys,
    };

    const BEFORE: u64 = MANDATORY_DATE - 1;
    const AFTER: u64 = MANDATORY_DATE + 60_000;

    type Service = PqcValidationService<NativeSignatureVerifier, FixedClock>;

    fn service_at(now: u64, config: ValidatorNodeConfiguration) -> Service {
        PqcValidationService::with_time_source(NativeSignatureVerifier, FixedClock(now), config)
            .unwrap()
    }

    // =============================================================================
    // MIGRATION TIMELINE
    // =============================================================================

    /// Test: ECDSA transactions are valid until the mandatory date, then refused
    #[test]
    fn test_classical_accepted_before_and_rejected_after_mandatory_date() {
        let wallet = Wallet::new();
        let tx = wallet.sign_classical(b"transfer 10 QC to alice");
        let service = service_at(BEFORE, migrating_config());

        let before = service.validate_transaction_at(&tx, &wallet.keys(), BEFORE);
        assert!(before.is_valid);
        assert_eq!(before.effective_level, ValidationLevel::Hybrid);
        assert_eq!(before.classical_valid, Some(true));
        assert_eq!(before.post_quantum_valid, None);

        let after = service.validate_transaction_at(&tx, &wallet.keys(), AFTER);
        assert!(!after.is_valid);
        assert_eq!(after.effective_level, ValidationLevel::QuantumResistantOnly);
        assert_eq!(after.rejection, Some(RejectionReason::PolicyRejected));
        // Still verified, so callers can tell a good legacy signature apart.
        assert_eq!(after.classical_valid, Some(true));
    }

    /// Test: version-1 transactions validate as ECDSA
    #[test]
    fn test_v1_transaction_validates_as_ecdsa() {
        let wallet = Wallet::new();
        let tx = wallet.sign_v1(b"legacy payload");
        let service = service_at(BEFORE, config_at(ValidationLevel::ClassicalOnly));

        let result = service.validate_transaction(&tx, &wallet.keys());
        assert!(result.is_valid);
        assert_eq!(result.signature_kind, SignatureKind::Classical);
    }

    /// Test: Ed25519 keys are picked up by the classical verifier
    #[test]
    fn test_ed25519_classical_transaction() {
        let signer = Ed25519Signer::new();
        let data = b"ed25519 payload".to_vec();
        let tx = Transaction::v2(data.clone(), signer.sign(&data), SignatureAlgorithm::Ed25519);
        let keys = VerificationKeys::new(signer.public_key(), Vec::new());

        let result = service_at(BEFORE, ValidatorNodeConfiguration::default())
            .validate_transaction(&tx, &keys);
        assert!(result.is_valid);
    }

    /// Test: ML-DSA-65 is admitted wherever post-quantum signatures are allowed
    #[test]
    fn test_ml_dsa_across_levels() {
        let wallet = Wallet::new();
        let tx = wallet.sign_ml_dsa(b"pq transfer");
        let keys = wallet.keys();

        for (level, admitted) in [
            (ValidationLevel::ClassicalOnly, false),
            (ValidationLevel::Hybrid, true),
            (ValidationLevel::HybridRequired, false),
            (ValidationLevel::QuantumResistantOnly, true),
        ] {
            let result = service_at(BEFORE, config_at(level)).validate_transaction(&tx, &keys);
            assert_eq!(result.is_valid, admitted, "level {level}");
            assert_eq!(result.post_quantum_valid, Some(true), "level {level}");
            if !admitted {
                assert_eq!(result.rejection, Some(RejectionReason::PolicyRejected));
            }
        }
    }

    /// Test: a signature from a different ML-DSA key is refused
    #[test]
    fn test_ml_dsa_wrong_key_rejected() {
        let signer = Wallet::new();
        let other = Wallet::new();
        let tx = signer.sign_ml_dsa(b"pq transfer");

        let result = service_at(AFTER, migrating_config()).validate_transaction(&tx, &other.keys());
        assert!(!result.is_valid);
        assert_eq!(result.rejection, Some(RejectionReason::SignatureVerificationFailed));
        assert_eq!(result.post_quantum_valid, Some(false));
    }

    // =============================================================================
    // HYBRID
    // =============================================================================

    /// Test: ECDSA + ML-DSA-65 satisfies HybridRequired
    #[test]
    fn test_hybrid_accepted_under_hybrid_required() {
        let wallet = Wallet::new();
        let tx = wallet.sign_hybrid(b"hybrid transfer");

        let result = service_at(BEFORE, config_at(ValidationLevel::HybridRequired))
            .validate_transaction(&tx, &wallet.keys());

        assert!(result.is_valid);
        assert_eq!(result.signature_kind, SignatureKind::Hybrid);
        assert_eq!(result.classical_valid, Some(true));
        assert_eq!(result.post_quantum_valid, Some(true));
    }

    /// Test: a tampered ML-DSA half fails the hybrid
    #[test]
    fn test_tampered_post_quantum_component_rejected() {
        let wallet = Wallet::new();
        let data = b"hybrid transfer";
        let mut pq = wallet.ml_dsa.sign(data);
        pq[42] ^= 0x80;
        let signature = HybridSignature::from_components(&wallet.ecdsa.sign(data), &pq);
        let tx = Transaction::v2_hybrid(
            data.to_vec(),
            signature,
            SignatureAlgorithm::HybridEcdsaMlDsa65,
        );

        let result = service_at(BEFORE, config_at(ValidationLevel::HybridRequired))
            .validate_transaction(&tx, &wallet.keys());

        assert!(!result.is_valid);
        assert_eq!(result.rejection, Some(RejectionReason::SignatureVerificationFailed));
        assert_eq!(result.classical_valid, Some(true));
        assert_eq!(result.post_quantum_valid, Some(false));
    }

    /// Test: after the cutover only the post-quantum half of a hybrid counts
    #[test]
    fn test_hybrid_after_cutover_needs_only_post_quantum() {
        let wallet = Wallet::new();
        let stranger = EcdsaSigner::new();
        let data = b"hybrid transfer";
        let signature =
            HybridSignature::from_components(&stranger.sign(data), &wallet.ml_dsa.sign(data));
        let tx = Transaction::v2_hybrid(
            data.to_vec(),
            signature,
            SignatureAlgorithm::HybridEcdsaMlDsa65,
        );
        let keys = wallet.keys();

        let hybrid_required = service_at(BEFORE, config_at(ValidationLevel::HybridRequired))
            .validate_transaction(&tx, &keys);
        assert!(!hybrid_required.is_valid);

        let after = service_at(AFTER, migrating_config()).validate_transaction(&tx, &keys);
        assert!(after.is_valid);
        assert_eq!(after.classical_valid, Some(false));
        assert_eq!(after.post_quantum_valid, Some(true));
    }

    /// Test: a transaction whose flags contradict its algorithm is refused
    #[test]
    fn test_metadata_mismatch_rejected() {
        let wallet = Wallet::new();
        let mut tx = wallet.sign_ml_dsa(b"pq transfer");
        tx.quantum_resistant = false;

        let result = service_at(BEFORE, ValidatorNodeConfiguration::default())
            .validate_transaction(&tx, &wallet.keys());
        assert_eq!(result.rejection, Some(RejectionReason::AlgorithmMismatch));
    }

    /// Test: an ECDSA signature relabelled as another classical scheme is refused
    #[test]
    fn test_relabelled_ecdsa_signature_rejected() {
        let wallet = Wallet::new();
        let data = b"relabelled transfer".to_vec();
        let ecdsa_sig = wallet.ecdsa.sign(&data);
        let service = service_at(BEFORE, config_at(ValidationLevel::ClassicalOnly));

        for declared in [SignatureAlgorithm::Ed25519, SignatureAlgorithm::Rsa2048] {
            let tx = Transaction::v2(data.clone(), ecdsa_sig.clone(), declared);

            let result = service.validate_transaction(&tx, &wallet.keys());
            assert!(!result.is_valid, "{declared} accepted an ECDSA proof");
            assert_eq!(result.rejection, Some(RejectionReason::AlgorithmMismatch));
        }
    }

    /// Test: an ECDSA hybrid half declared as RSA is refused before and after cutover
    #[test]
    fn test_relabelled_hybrid_classical_half_rejected() {
        let wallet = Wallet::new();
        let data = b"relabelled hybrid".to_vec();
        let signature =
            HybridSignature::from_components(&wallet.ecdsa.sign(&data), &wallet.ml_dsa.sign(&data));
        let tx = Transaction::v2_hybrid(data, signature, SignatureAlgorithm::HybridRsaMlDsa65);
        let service = service_at(BEFORE, migrating_config());

        for now in [BEFORE, AFTER] {
            let result = service.validate_transaction_at(&tx, &wallet.keys(), now);
            assert!(!result.is_valid);
            assert_eq!(result.rejection, Some(RejectionReason::AlgorithmMismatch));
        }
    }

    // =============================================================================
    // WIRE PATH
    // =============================================================================

    /// Test: encoded hybrid transaction decodes and validates
    #[test]
    fn test_encoded_hybrid_round_trip_through_service() {
        let wallet = Wallet::new();
        let tx = wallet.sign_hybrid(b"wire transfer");
        let bytes = serialize(&tx).unwrap();
        let service = service_at(BEFORE, config_at(ValidationLevel::HybridRequired));

        let result = service.validate_encoded(&bytes, &wallet.keys()).unwrap();
        assert!(result.is_valid);

        let err = service
            .validate_encoded(&bytes[..bytes.len() - 1], &wallet.keys())
            .unwrap_err();
        assert!(matches!(err, TransactionError::MalformedTransaction(_)));
    }

    /// Test: an unknown version byte fails closed
    #[test]
    fn test_encoded_unknown_version() {
        let wallet = Wallet::new();
        let mut bytes = serialize(&wallet.sign_classical(b"x")).unwrap();
        bytes[0] = 9;

        let err = service_at(BEFORE, ValidatorNodeConfiguration::default())
            .validate_encoded(&bytes, &wallet.keys())
            .unwrap_err();
        assert_eq!(err, TransactionError::UnsupportedVersion(9));
    }

    // =============================================================================
    // BLOCK ASSEMBLY
    // =============================================================================

    /// Test: mixed block validates in parallel and keeps block order
    #[test]
    fn test_block_validation_mixed_candidates() {
        let wallet = Wallet::new();
        let other = Wallet::new();
        let candidates = vec![
            BlockCandidate::new(wallet.sign_classical(&payload(1, 100)), wallet.keys()),
            BlockCandidate::new(wallet.sign_ml_dsa(&payload(2, 100)), wallet.keys()),
            BlockCandidate::new(wallet.sign_hybrid(&payload(3, 100)), wallet.keys()),
            BlockCandidate::new(wallet.sign_ml_dsa(&payload(4, 100)), other.keys()),
        ];
        let expected_size: u64 = candidates.iter().map(|c| c.transaction.footprint()).sum();

        let block = service_at(BEFORE, ValidatorNodeConfiguration::default())
            .validate_block(&candidates)
            .unwrap();

        assert_eq!(block.results.len(), 4);
        assert_eq!(block.valid_count, 3);
        assert_eq!(block.invalid_count, 1);
        assert!(!block.all_valid);
        assert!(!block.results[3].is_valid);
        assert_eq!(block.total_size_bytes, expected_size);
    }

    /// Test: oversized blocks are refused as a whole
    #[test]
    fn test_oversized_block_rejected() {
        let wallet = Wallet::new();
        let candidates: Vec<_> = (0..2)
            .map(|i| BlockCandidate::new(wallet.sign_ml_dsa(&payload(i, 100)), wallet.keys()))
            .collect();
        let config = ValidatorNodeConfiguration {
            max_block_size_bytes: 4096,
            ..Default::default()
        };

        let err = service_at(BEFORE, config).validate_block(&candidates).unwrap_err();
        let BlockError::BlockTooLarge {
            total_size_bytes,
            max_block_size_bytes,
        } = err;
        assert!(total_size_bytes > 4096);
        assert_eq!(max_block_size_bytes, 4096);
    }

    /// Test: quantum-resistant transactions move to the front after the cutover
    #[test]
    fn test_pool_ordering_follows_cutover() {
        let wallet = Wallet::new();
        let pool = vec![
            wallet.sign_classical(b"c1"),
            wallet.sign_ml_dsa(b"q1"),
            wallet.sign_classical(b"c2"),
            wallet.sign_hybrid(b"q2"),
        ];

        let untouched = service_at(BEFORE, migrating_config()).order_pool(pool.clone());
        assert_eq!(untouched, pool);

        let ordered = service_at(AFTER, migrating_config()).order_pool(pool);
        let payloads: Vec<Vec<u8>> = ordered.into_iter().map(|tx| tx.data).collect();
        assert_eq!(payloads, [b"q1", b"q2", b"c1", b"c2"].map(|p| p.to_vec()));
    }

    // =============================================================================
    // CONFIGURATION & CATALOGUE
    // =============================================================================

    /// Test: a JSON snapshot installs and takes effect on the next call
    #[test]
    fn test_install_configuration_from_json() {
        let wallet = Wallet::new();
        let tx = wallet.sign_classical(b"late classical");
        let service = service_at(BEFORE, ValidatorNodeConfiguration::default());
        assert!(service.validate_transaction(&tx, &wallet.keys()).is_valid);

        let config: ValidatorNodeConfiguration =
            serde_json::from_str(r#"{ "base_validation_level": "hybrid_required" }"#).unwrap();
        service.install_configuration(config).unwrap();

        assert_eq!(service.effective_level(), ValidationLevel::HybridRequired);
        let result = service.validate_transaction(&tx, &wallet.keys());
        assert_eq!(result.rejection, Some(RejectionReason::PolicyRejected));
    }

    /// Test: the advertised catalogue matches the real key sizes
    #[test]
    fn test_supported_algorithms_match_real_keys() {
        let wallet = Wallet::new();
        let ml_dsa_65 = supported_algorithms(false)
            .into_iter()
            .find(|a| a.name == SignatureAlgorithm::MlDsa65.as_str())
            .unwrap();

        assert_eq!(ml_dsa_65.kind, AlgorithmKind::Signature);
        assert_eq!(ml_dsa_65.public_key_size, wallet.ml_dsa.public_key().len());
        assert_eq!(ml_dsa_65.output_size, wallet.ml_dsa.sign(b"m").len());
        assert!(supported_algorithms(false).iter().all(|a| a.quantum_resistant));
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    /// Test: decisions and size-gate rejections reach the Prometheus counters
    #[test]
    fn test_decisions_are_counted() {
        use quantum_telemetry::{PQC_BLOCK_ADMISSION_REJECTIONS, PQC_VALIDATIONS};

        let wallet = Wallet::new();
        let tx = wallet.sign_hybrid(b"counted");
        let accepted = PQC_VALIDATIONS.with_label_values(&["hybrid_required", "hybrid", "accepted"]);
        let before = accepted.get();

        service_at(BEFORE, config_at(ValidationLevel::HybridRequired))
            .validate_transaction(&tx, &wallet.keys());
        assert!(accepted.get() >= before + 1.0);

        let rejections = PQC_BLOCK_ADMISSION_REJECTIONS.get();
        let tiny = ValidatorNodeConfiguration {
            max_block_size_bytes: 1,
            ..Default::default()
        };
        let candidates = [BlockCandidate::new(tx, wallet.keys())];
        assert!(service_at(BEFORE, tiny).validate_block(&candidates).is_err());
        assert!(PQC_BLOCK_ADMISSION_REJECTIONS.get() >= rejections + 1.0);
    }

    /// Test: telemetry initialises once per process and exports validation metrics
    #[test]
    fn test_init_telemetry_exports_metrics() {
        use quantum_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::for_subsystem("10", "pqc-validation")
        };
        let _guard = init_telemetry(config).unwrap();

        let wallet = Wallet::new();
        service_at(BEFORE, ValidatorNodeConfiguration::default())
            .validate_transaction(&wallet.sign_ml_dsa(b"exported"), &wallet.keys());

        let text = encode_metrics().unwrap();
        assert!(text.contains("qc_pqc_validations_total"));
    }
}
