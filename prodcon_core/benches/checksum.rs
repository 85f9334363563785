//! Checksum hot-path benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use prodcon_core::layout::{PAYLOAD_SIZE, block_checksum};
use prodcon_core::producer::fill_block;
use std::hint::black_box;

/// Benchmark the shared checksum computation over one payload
fn bench_block_checksum(c: &mut Criterion) {
    let payload = [0xA5u8; PAYLOAD_SIZE];

    c.bench_function("block_checksum_30_bytes", |b| {
        b.iter(|| black_box(block_checksum(black_box(&payload))));
    });
}

/// Benchmark payload generation plus checksum, the producer's per-block work
fn bench_fill_block(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut payload = [0u8; PAYLOAD_SIZE];

    c.bench_function("fill_block_30_bytes", |b| {
        b.iter(|| black_box(fill_block(&mut payload, &mut rng)));
    });
}

criterion_group!(benches, bench_block_checksum, bench_fill_block);
criterion_main!(benches);
