//! lanekdf Criterion Benchmark
//!
//! Batch throughput in derivations per second across lane counts and
//! iteration counts.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanekdf::{derive_batch, DerivationParams, InputRecord, OutputRecord, SaltRecord};
use rand::prelude::*;
use std::hint::black_box;

/// `count` random 8..=24 byte passwords packed into records.
fn random_inputs(count: usize) -> Vec<InputRecord> {
    let mut bytes = vec![0u8; count * 25];
    rand::rng().fill(&mut bytes[..]);

    bytes
        .chunks(25)
        .map(|chunk| {
            let len = 8 + usize::from(chunk[0]) % 17;
            InputRecord::from_bytes(&chunk[1..=len]).unwrap()
        })
        .collect()
}

// =============================================================================
// BENCHMARK 1: LANE SCALING
// =============================================================================

/// Derivations per second as the batch grows (fixed 1000 iterations).
fn bench_lane_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Lane-Scaling");
    group.sample_size(10);

    let salt: SaltRecord = SaltRecord::from_bytes(b"saltSALT").unwrap();
    let params = DerivationParams::new(1000, 20).unwrap();

    for lanes in [1, 8, 64, 512, 4096] {
        let inputs = random_inputs(lanes);
        let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); lanes];
        group.throughput(Throughput::Elements(lanes as u64));

        group.bench_with_input(BenchmarkId::from_parameter(lanes), &inputs, |b, inputs| {
            b.iter(|| derive_batch(black_box(inputs), &salt, &mut outputs, &params).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: ITERATION COST
// =============================================================================

/// Cost of the inner loop: one 256-lane batch at increasing iteration counts.
fn bench_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Iterations");
    group.sample_size(10);

    let inputs = random_inputs(256);
    let salt: SaltRecord = SaltRecord::from_bytes(b"NaCl").unwrap();
    let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];

    for iterations in [1, 100, 1000, 4096] {
        let params = DerivationParams::new(iterations, 20).unwrap();
        group.throughput(Throughput::Elements(u64::from(iterations) * 256));

        group.bench_function(BenchmarkId::from_parameter(iterations), |b| {
            b.iter(|| derive_batch(black_box(&inputs), &salt, &mut outputs, &params).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: OUTPUT LENGTH
// =============================================================================

/// One versus two derived-key blocks per lane.
fn bench_output_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Output-Blocks");
    group.sample_size(10);

    let inputs = random_inputs(256);
    let salt: SaltRecord = SaltRecord::from_bytes(b"NaCl").unwrap();
    let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];

    for dk_len in [16, 20, 32, 40] {
        let params = DerivationParams::new(1000, dk_len).unwrap();
        group.bench_function(format!("{dk_len} bytes"), |b| {
            b.iter(|| derive_batch(black_box(&inputs), &salt, &mut outputs, &params).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lane_scaling, bench_iterations, bench_output_blocks);
criterion_main!(benches);
