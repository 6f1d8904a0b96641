// Filter build and query benchmarks for levelbloom

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use levelbloom::{key_may_match, BloomFilterPolicy, FilterConfig, FilterPolicy};
use std::hint::black_box;

fn make_keys(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| format!("key{:08}", i).into_bytes()).collect()
}

fn benchmark_create_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_filter");
    let policy = BloomFilterPolicy::new(FilterConfig::new(vec![10]));

    for size in [100, 1000, 10000].iter() {
        let keys = make_keys(*size);
        let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &refs, |b, refs| {
            let mut dst = Vec::new();
            b.iter(|| {
                dst.clear();
                policy.create_filter(refs, 0, &mut dst).unwrap();
                black_box(&dst);
            });
        });
    }

    group.finish();
}

fn benchmark_key_may_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_may_match");

    for bits_per_key in [4, 10, 20].iter() {
        let policy = BloomFilterPolicy::new(FilterConfig::new(vec![*bits_per_key]));
        let keys = make_keys(10000);
        let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
        let mut filter = Vec::new();
        policy.create_filter(&refs, 0, &mut filter).unwrap();

        let probes: Vec<Vec<u8>> = (0..1000).map(|i| format!("probe{:08}", i).into_bytes()).collect();

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("bits_per_key", bits_per_key),
            &filter,
            |b, filter| {
                b.iter(|| {
                    for key in &probes {
                        black_box(key_may_match(key, filter));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_create_filter, benchmark_key_may_match);
criterion_main!(benches);
