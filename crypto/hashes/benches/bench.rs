// Benchmarks for header hashing
// Run with: cargo bench --bench bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sst_hashes::{blake512::blake512, bmw512::bmw512, double_sha256, merkle_root, quark, Hash};

fn header_bytes() -> Vec<u8> {
    (0u8..80).collect()
}

fn bench_quark_header(c: &mut Criterion) {
    let header = header_bytes();
    c.bench_function("quark::header", |b| b.iter(|| quark(black_box(&header))));
}

fn bench_stages(c: &mut Criterion) {
    let header = header_bytes();
    c.bench_function("blake512::header", |b| b.iter(|| blake512(black_box(&header))));
    c.bench_function("bmw512::header", |b| b.iter(|| bmw512(black_box(&header))));
    c.bench_function("double_sha256::header", |b| b.iter(|| double_sha256(black_box(&header))));
}

fn bench_merkle_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_root");
    for count in [1usize, 16, 256] {
        let leaves: Vec<Hash> = (0..count as u64).map(Hash::from_u64_word).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &leaves, |b, leaves| {
            b.iter(|| merkle_root(black_box(leaves)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quark_header, bench_stages, bench_merkle_root);
criterion_main!(benches);
