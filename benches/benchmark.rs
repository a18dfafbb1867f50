//! Performance benchmarks for seed-remap
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seed_remap::core::{
    parse_almanac_str, IntervalMapping, RangeRemapper, SearchConfig, SeedInterval, StageTable,
};

const EXAMPLE: &str = include_str!("../input/example");

/// Table with `count` disjoint mappings of width 100
fn wide_table(count: u64) -> StageTable {
    (0..count)
        .map(|i| IntervalMapping::new(i * 7 % 1000 * 1000, i * 200, 100))
        .collect()
}

/// Benchmark a single stage lookup
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage_lookup");

    for size in [10u64, 100, 1000].iter() {
        let table = wide_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                for key in (0..size * 200).step_by(37) {
                    black_box(table.lookup(black_box(key)));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark full chain evaluation
fn bench_chain(c: &mut Criterion) {
    let almanac = parse_almanac_str(EXAMPLE).unwrap();

    c.bench_function("chain_evaluate", |b| {
        b.iter(|| black_box(almanac.chain.evaluate(black_box(79))))
    });
}

/// Benchmark seed interval search at different fan-outs
fn bench_seed_search(c: &mut Criterion) {
    let almanac = parse_almanac_str(EXAMPLE).unwrap();
    let seed = SeedInterval::new(0, 200_000);

    let mut group = c.benchmark_group("seed_minimum");
    group.throughput(Throughput::Elements(seed.length));

    for fan_out in [1usize, 2, 4, 8].iter() {
        let config = SearchConfig {
            fan_out: *fan_out,
            threads: 0,
        };
        let remapper = RangeRemapper::new(&almanac.chain, config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(fan_out), fan_out, |b, _| {
            b.iter(|| black_box(remapper.seed_minimum(black_box(seed))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_chain, bench_seed_search);
criterion_main!(benches);
