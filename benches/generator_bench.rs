//! Benchmark for generator pipelines.
//!
//! Compares decorated generator pipelines with the equivalent standard
//! iterator chains, and measures collection into fresh and reused containers.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use functors::functor::{IsLessThan, IsMultipleOf, Not, Offset};
use functors::generator::{EachElement, Generator, IntoCollection};
use functors::range::Range;
use std::hint::black_box;

// =============================================================================
// 1. Range traversal
// =============================================================================

fn benchmark_range_traversal(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range_traversal");

    for size in [100, 10_000] {
        group.bench_with_input(BenchmarkId::new("generator", size), &size, |bencher, &size| {
            let range = Range::between(0_i64, size).unwrap();
            bencher.iter(|| {
                let mut sum = 0;
                range.run(|value: i64| sum += value);
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0_i64..size).sum::<i64>()));
        });
    }

    group.finish();
}

// =============================================================================
// 2. Decorated pipelines
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter_map_take_while");

    for size in [100, 10_000] {
        group.bench_with_input(BenchmarkId::new("generator", size), &size, |bencher, &size| {
            let pipeline = Range::between(0_i64, size)
                .unwrap()
                .filter(Not(IsMultipleOf(3)))
                .map(Offset(7))
                .take_while(IsLessThan(size));
            bencher.iter(|| black_box(pipeline.to_collection()));
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let collected: Vec<i64> = (0..size)
                    .filter(|value| value % 3 != 0)
                    .map(|value| value + 7)
                    .take_while(|value| *value < size)
                    .collect();
                black_box(collected)
            });
        });
    }

    group.finish();
}

// =============================================================================
// 3. Collection
// =============================================================================

fn benchmark_collection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("collection");
    let source: Vec<u32> = (0..10_000).collect();

    group.bench_function("each_element_to_collection", |bencher| {
        let each = EachElement::of(&source);
        bencher.iter(|| black_box(each.to_collection()));
    });

    group.bench_function("into_reused_collection", |bencher| {
        let each = EachElement::of(&source).map(|value: &u32| *value);
        let mut target = Vec::with_capacity(source.len());
        bencher.iter(|| {
            target.clear();
            black_box(each.to(IntoCollection::new(&mut target)).len())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_range_traversal,
    benchmark_pipeline,
    benchmark_collection
);

criterion_main!(benches);
