//! Benchmark for `List` vs standard collections.
//!
//! Compares the persistent cons list against `VecDeque` for prepend-heavy
//! workloads, and measures the combinators where representation matters:
//! generic node splicing vs the packed fast path in `append`, and the
//! staging-based `sort` and `split`.

use conslist::List;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::VecDeque;
use std::hint::black_box;

// =============================================================================
// cons Benchmark (prepend)
// =============================================================================

fn benchmark_cons(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cons");

    for size in [100, 1000, 10000] {
        // List cons (O(1), shares the previous version)
        group.bench_with_input(BenchmarkId::new("List", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut list = List::new();
                for index in 0..size {
                    list = list.cons(black_box(index));
                }
                black_box(list)
            });
        });

        // VecDeque push_front
        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut deque = VecDeque::new();
                    for index in 0..size {
                        deque.push_front(black_box(index));
                    }
                    black_box(deque)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// append Benchmark (node splicing vs packed fast path)
// =============================================================================

fn benchmark_append(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("append");

    for size in [100, 1000, 10000] {
        let spliced_left: List<char> = "x".repeat(size).chars().collect();
        let spliced_right: List<char> = "y".repeat(size).chars().collect();
        let packed_left = List::from_text(&"x".repeat(size));
        let packed_right = List::from_text(&"y".repeat(size));

        group.bench_with_input(BenchmarkId::new("nodes", size), &size, |bencher, _| {
            bencher.iter(|| black_box(spliced_left.append(&spliced_right)));
        });

        group.bench_with_input(BenchmarkId::new("packed", size), &size, |bencher, _| {
            bencher.iter(|| black_box(packed_left.append(&packed_right)));
        });
    }

    group.finish();
}

// =============================================================================
// sort Benchmark
// =============================================================================

fn benchmark_sort(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sort");

    for size in [100, 1000, 10000] {
        let list: List<i64> = (0..size).map(|index| (index * 7919) % size).collect();

        group.bench_with_input(BenchmarkId::new("List", size), &size, |bencher, _| {
            bencher.iter(|| black_box(list.sort()));
        });
    }

    group.finish();
}

// =============================================================================
// split Benchmark
// =============================================================================

fn benchmark_split(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("split");

    for size in [100, 1000] {
        let text = "ab,".repeat(size);
        let list = List::from_text(&text);
        let separator = List::from_text(",");

        group.bench_with_input(BenchmarkId::new("List", size), &size, |bencher, _| {
            bencher.iter(|| black_box(list.split(&separator)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cons,
    benchmark_append,
    benchmark_sort,
    benchmark_split
);
criterion_main!(benches);
