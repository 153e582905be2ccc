//! Criterion benches for the three disk strategies.
//!
//! - sampler: raw N(0,1) throughput, discard vs cache Box–Muller.
//! - disk: unconstrained / small / large at a few star counts. Small is O(n²),
//!   so it stops at the smaller sizes.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use starmap::{BoxMuller, DiskGenerator, DiskParams, GaussianSampler};

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("gauss");
    for mode in [BoxMuller::Discard, BoxMuller::Cache] {
        group.bench_function(BenchmarkId::new("sample_n", format!("{mode:?}")), |b| {
            b.iter_batched(
                || GaussianSampler::seeded(42).with_mode(mode),
                |mut s| s.sample_n(10_000),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn disk(count: u32) -> DiskParams {
    DiskParams {
        count,
        min_distance: 0.5,
        min_center_distance: 2.0,
        size: 40.0,
        thickness: 0.2,
        max_attempts: None,
    }
}

fn bench_disk(c: &mut Criterion) {
    let mut group = c.benchmark_group("disk");
    group.sample_size(10);
    for count in [1_000u32, 5_000, 20_000] {
        group.bench_function(BenchmarkId::new("unconstrained", count), |b| {
            b.iter_batched(
                || DiskGenerator::seeded(disk(count), 7).unwrap(),
                |mut gen| gen.unconstrained(),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("large", count), |b| {
            b.iter_batched(
                || DiskGenerator::seeded(disk(count), 7).unwrap(),
                |mut gen| gen.large().unwrap(),
                BatchSize::SmallInput,
            )
        });
        if count <= 5_000 {
            group.bench_function(BenchmarkId::new("small", count), |b| {
                b.iter_batched(
                    || DiskGenerator::seeded(disk(count), 7).unwrap(),
                    |mut gen| gen.small().unwrap(),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sampler, bench_disk);
criterion_main!(benches);
