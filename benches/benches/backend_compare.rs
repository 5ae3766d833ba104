//! Backend Comparison Benchmark
//!
//! Compares the rayon executor, the serial executor, the scalar API and the
//! RustCrypto `pbkdf2` crate on the same workload. Quantifies the cost of
//! lane dispatch and the speedup from spreading lanes over cores.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lanekdf::{
    derive_batch, derive_batch_serial, DerivationParams, InputRecord, OutputRecord, SaltRecord,
};
use rayon::prelude::*;
use std::hint::black_box;

const LANES: usize = 512;
const ITERATIONS: u32 = 1000;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("PBKDF2-HMAC-SHA1 Backends");
    group.sample_size(10);
    group.throughput(Throughput::Elements(LANES as u64));

    let passwords: Vec<Vec<u8>> = (0..LANES)
        .map(|i| format!("password-{i}").into_bytes())
        .collect();
    let inputs: Vec<InputRecord> = passwords
        .iter()
        .map(|p| InputRecord::from_bytes(p).unwrap())
        .collect();
    let salt: SaltRecord = SaltRecord::from_bytes(b"saltSALT").unwrap();
    let params = DerivationParams::new(ITERATIONS, 20).unwrap();
    let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); LANES];

    // 1. Batch engine on the active backend (Production Path)
    group.bench_function(format!("Batch ({})", lanekdf::active_backend()), |b| {
        b.iter(|| derive_batch(black_box(&inputs), &salt, &mut outputs, &params).unwrap());
    });

    // 2. Batch engine, lanes in order on one thread
    group.bench_function("Batch (Serial)", |b| {
        b.iter(|| derive_batch_serial(black_box(&inputs), &salt, &mut outputs, &params).unwrap());
    });

    // 3. Scalar API, one call per password
    group.bench_function("Scalar lanekdf", |b| {
        b.iter(|| {
            for password in &passwords {
                let mut key = [0u8; 20];
                lanekdf::pbkdf2_hmac_sha1(black_box(password), b"saltSALT", ITERATIONS, &mut key)
                    .unwrap();
                black_box(key);
            }
        });
    });

    // 4. RustCrypto reference, one call per password
    group.bench_function("Scalar RustCrypto", |b| {
        b.iter(|| {
            for password in &passwords {
                let mut key = [0u8; 20];
                let password = black_box(password);
                pbkdf2::pbkdf2_hmac::<sha1::Sha1>(password, b"saltSALT", ITERATIONS, &mut key);
                black_box(key);
            }
        });
    });

    // 5. RustCrypto reference spread over the rayon pool
    group.bench_function("Parallel RustCrypto", |b| {
        b.iter(|| {
            let keys: Vec<[u8; 20]> = passwords
                .par_iter()
                .map(|password| {
                    let mut key = [0u8; 20];
                    pbkdf2::pbkdf2_hmac::<sha1::Sha1>(password, b"saltSALT", ITERATIONS, &mut key);
                    key
                })
                .collect();
            black_box(keys);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
