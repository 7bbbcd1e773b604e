//! Dispatch benchmarks using Criterion.
//!
//! These benchmarks measure emitter operations in isolation:
//! - Unbound callback dispatch
//! - Bound callback fan-out across enrolled instances
//! - Narrow emits to a receiver subset
//! - Enroll/unenroll churn

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rusty_bench::listeners::{Ticker, bound_emitter, unbound_emitter};
use rusty_emitter::{Emitter, Receiver};

// =============================================================================
// Unbound Benchmarks
// =============================================================================

fn bench_unbound(c: &mut Criterion) {
    let mut group = c.benchmark_group("unbound");

    for count in [1, 10, 100] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("callbacks", count), &count, |b, &n| {
            let (emitter, _total) = unbound_emitter(n);
            b.iter(|| emitter.emit(black_box("tick"), black_box(&1)));
        });
    }

    group.bench_function("no_subscribers", |b| {
        let emitter = Emitter::<u64>::new();
        b.iter(|| emitter.emit(black_box("silence"), black_box(&1)));
    });

    group.finish();
}

// =============================================================================
// Fan-out Benchmarks
// =============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for count in [10, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("emit", count), &count, |b, &n| {
            let (emitter, _tickers) = bound_emitter(n).expect("enroll tickers");
            b.iter(|| emitter.emit(black_box("tick"), black_box(&1)));
        });

        // Every tenth instance as an explicit receiver set
        group.bench_with_input(BenchmarkId::new("emit_to", count), &count, |b, &n| {
            let (emitter, tickers) = bound_emitter(n).expect("enroll tickers");
            let receivers: Vec<Receiver> = tickers
                .iter()
                .step_by(10)
                .map(|t| t.clone() as Receiver)
                .collect();
            b.iter(|| emitter.emit_to(black_box("tick"), &receivers, black_box(&1)));
        });
    }

    group.finish();
}

// =============================================================================
// Enrollment Benchmarks
// =============================================================================

fn bench_enrollment(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrollment");

    for count in [100, 1_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("spawn", count), &count, |b, &n| {
            b.iter(|| {
                let emitter = Emitter::<u64>::new();
                emitter.listener::<Ticker>();
                for _ in 0..n {
                    let _ = black_box(emitter.spawn(Ticker::default()));
                }
            });
        });

        // Unlisten from the front, the worst case for the ordered live set
        group.bench_with_input(BenchmarkId::new("unlisten", count), &count, |b, &n| {
            b.iter_batched(
                || bound_emitter(n).expect("enroll tickers"),
                |(emitter, tickers)| {
                    for ticker in &tickers {
                        let _ = black_box(emitter.unlisten(ticker));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_unbound, bench_fan_out, bench_enrollment);

criterion_main!(benches);
