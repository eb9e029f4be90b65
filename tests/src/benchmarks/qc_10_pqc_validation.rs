//! # QC-10 PQC Validation Benchmarks
//!
//! Measures the cost of each signature kind and of a full block pass:
//! - Single classical, ML-DSA-65 and hybrid validation
//! - Wire decode + validate
//! - Parallel block validation at 10 / 100 / 500 transactions
//! - Size gate rejection (no signature work)

use crate::fixtures::{payload, FixedClock, Wallet};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_10_pqc_validation::{
    deserialize, serialize, BlockCandidate, NativeSignatureVerifier, PqcValidationApi,
    PqcValidationService, ValidatorNodeConfiguration,
};
use std::time::Duration;

const NOW: u64 = 1_700_000_000_000;

fn service(config: ValidatorNodeConfiguration) -> PqcValidationService<NativeSignatureVerifier, FixedClock> {
    PqcValidationService::with_time_source(NativeSignatureVerifier, FixedClock(NOW), config)
        .expect("benchmark configuration is valid")
}

/// Mix of kinds in a 2:1:1 classical / ML-DSA / hybrid ratio.
fn mixed_block(wallet: &Wallet, size: usize) -> Vec<BlockCandidate> {
    (0..size)
        .map(|i| {
            let data = payload(i as u32, 256);
            let tx = match i % 4 {
                0 | 1 => wallet.sign_classical(&data),
                2 => wallet.sign_ml_dsa(&data),
                _ => wallet.sign_hybrid(&data),
            };
            BlockCandidate::new(tx, wallet.keys())
        })
        .collect()
}

pub fn bench_single_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-10-pqc-validation/single");
    group.measurement_time(Duration::from_secs(10));

    let wallet = Wallet::new();
    let keys = wallet.keys();
    let data = payload(0, 256);
    let service = service(ValidatorNodeConfiguration::default());

    for (name, tx) in [
        ("ecdsa", wallet.sign_classical(&data)),
        ("ml_dsa_65", wallet.sign_ml_dsa(&data)),
        ("hybrid_ecdsa_ml_dsa_65", wallet.sign_hybrid(&data)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(service.validate_transaction(black_box(&tx), &keys)))
        });
    }

    let encoded = serialize(&wallet.sign_hybrid(&data)).expect("hybrid fits the field cap");
    group.bench_function("decode_only", |b| {
        b.iter(|| black_box(deserialize(black_box(&encoded))))
    });
    group.bench_function("decode_and_validate", |b| {
        b.iter(|| black_box(service.validate_encoded(black_box(&encoded), &keys)))
    });

    group.finish();
}

pub fn bench_block_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-10-pqc-validation/block");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(15));

    let wallet = Wallet::new();
    let service = service(ValidatorNodeConfiguration::default());

    for size in [10usize, 100, 500] {
        let candidates = mixed_block(&wallet, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("mixed_parallel", size),
            &candidates,
            |b, candidates| b.iter(|| black_box(service.validate_block(candidates))),
        );
    }

    group.finish();
}

pub fn bench_size_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-10-pqc-validation/size-gate");

    let wallet = Wallet::new();
    let candidates = mixed_block(&wallet, 100);
    let service = service(ValidatorNodeConfiguration {
        max_block_size_bytes: 1024,
        ..Default::default()
    });

    group.bench_function("reject_oversized_100", |b| {
        b.iter(|| black_box(service.validate_block(black_box(&candidates)).is_err()))
    });

    group.finish();
}

/// Register all QC-10 benchmarks
pub fn register_benchmarks(c: &mut Criterion) {
    bench_single_validation(c);
    bench_block_validation(c);
    bench_size_gate(c);
}
