//! Benchmark for aggregators.
//!
//! Measures add/evaluate cost of list-backed and no-store aggregators, and
//! lock contention when several threads add concurrently.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use functors::aggregator::{
    Count, ListBackedAggregator, Mean, Median, NoStoreAggregator, Percentile,
};
use std::hint::black_box;
use std::thread;

// =============================================================================
// 1. Single-threaded add
// =============================================================================

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("aggregator_add");

    group.bench_function("no_store_count", |bencher| {
        let counter = NoStoreAggregator::<u64, Count>::count();
        bencher.iter(|| counter.add(black_box(1)));
    });

    group.bench_function("list_backed_mean", |bencher| {
        let mean = ListBackedAggregator::<f64, Mean>::with_function(Mean);
        bencher.iter(|| {
            if mean.data_size() >= 100_000 {
                mean.reset();
            }
            mean.add(black_box(1.5))
        });
    });

    group.finish();
}

// =============================================================================
// 2. Evaluation over a series
// =============================================================================

fn benchmark_evaluate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("aggregator_evaluate");

    for size in [100_u32, 10_000] {
        let copying = ListBackedAggregator::with_function(Median::copying());
        let percentile =
            ListBackedAggregator::with_function(Percentile::new(99.0, true).unwrap());
        for value in (0..size).rev() {
            copying.add(f64::from(value)).unwrap();
            percentile.add(f64::from(value)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("median_copying", size), &size, |bencher, _| {
            bencher.iter(|| black_box(copying.evaluate()));
        });
        group.bench_with_input(BenchmarkId::new("percentile_99", size), &size, |bencher, _| {
            bencher.iter(|| black_box(percentile.evaluate()));
        });
    }

    group.finish();
}

// =============================================================================
// 3. Contention
// =============================================================================

fn benchmark_contention(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("aggregator_contention");

    for threads in [1, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |bencher, &threads| {
            bencher.iter(|| {
                let counter = NoStoreAggregator::<u64, Count>::count();
                thread::scope(|scope| {
                    for _ in 0..threads {
                        scope.spawn(|| {
                            for _ in 0..1_000 {
                                let _ = counter.add(1);
                            }
                        });
                    }
                });
                black_box(counter.result())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_evaluate, benchmark_contention);

criterion_main!(benches);
