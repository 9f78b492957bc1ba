//! Benchmarks for the lifecycle reducer hot path.
//!
//! Run with: cargo bench -p crouton-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crouton_core::reducer::{Action, State, reduce};
use crouton_core::toast::{DismissReason, Toast, ToastKind, ToastOptions};
use std::hint::black_box;
use std::time::Instant;

fn populated(count: usize) -> State {
    let mut state = State::default();
    for n in 0..count {
        let toast = Toast::build(
            ToastKind::Blank,
            "bench",
            ToastOptions::new().id(n.to_string()),
            Instant::now(),
        );
        state = reduce(&state, &Action::Add(toast));
    }
    state
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");

    for count in [1usize, 10, 20] {
        let state = populated(count);

        let add = Action::Add(Toast::build(
            ToastKind::Success,
            "new",
            ToastOptions::new(),
            Instant::now(),
        ));
        group.bench_with_input(BenchmarkId::new("add", count), &(), |b, _| {
            b.iter(|| black_box(reduce(&state, &add)))
        });

        let dismiss_all = Action::Dismiss {
            id: None,
            reason: DismissReason::Programmatic,
        };
        group.bench_with_input(BenchmarkId::new("dismiss_all", count), &(), |b, _| {
            b.iter(|| black_box(reduce(&state, &dismiss_all)))
        });

        let upsert = Action::Upsert(Toast::build(
            ToastKind::Error,
            "refresh",
            ToastOptions::new().id("0"),
            Instant::now(),
        ));
        group.bench_with_input(BenchmarkId::new("upsert_existing", count), &(), |b, _| {
            b.iter(|| black_box(reduce(&state, &upsert)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
