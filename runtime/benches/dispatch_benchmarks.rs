//! Dispatch Performance Benchmarks
//!
//! - Reducer execution in isolation (no Store overhead)
//! - Store dispatch throughput with and without listeners
//! - Notification cost as the listener count grows
//!
//! Run with: `cargo bench -p redux-lite-runtime`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(dead_code)] // Benchmark state carries an unread payload

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use redux_lite_core::{Action, Reducer};
use redux_lite_runtime::Store;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct BenchState {
    counter: i64,
    data: Arc<Vec<u8>>, // Shared payload, cloned per dispatch
}

impl Default for BenchState {
    fn default() -> Self {
        Self {
            counter: 0,
            data: Arc::new(vec![0; 1024]),
        }
    }
}

#[derive(Action, Clone, Debug)]
enum BenchAction {
    Increment,
    SetValue(i64),
    #[action(init)]
    Init,
}

struct BenchReducer;

impl Reducer for BenchReducer {
    type State = BenchState;
    type Action = BenchAction;

    fn reduce(&self, state: &mut BenchState, action: &BenchAction) {
        match action {
            BenchAction::Increment => state.counter += 1,
            BenchAction::SetValue(v) => state.counter = *v,
            BenchAction::Init => {},
        }
    }
}

/// Benchmark reducer execution in isolation (no Store overhead)
fn benchmark_reducer_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("increment", |b| {
        let mut state = BenchState::default();
        b.iter(|| BenchReducer.reduce(&mut state, black_box(&BenchAction::Increment)));
    });

    group.bench_function("reduced_clone", |b| {
        let state = BenchState::default();
        b.iter(|| BenchReducer.reduced(&state, black_box(&BenchAction::SetValue(42))));
    });

    group.finish();
}

/// Benchmark Store throughput (actions/sec)
fn benchmark_store_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_throughput");
    group.throughput(Throughput::Elements(1));

    group.bench_function("dispatch", |b| {
        let store = Store::new(BenchReducer);
        b.iter(|| store.dispatch(black_box(BenchAction::Increment)));
    });

    group.bench_function("dispatch_and_read_state", |b| {
        let store = Store::new(BenchReducer);
        b.iter(|| {
            let _ = store.dispatch(black_box(BenchAction::Increment));
            store.state(|s| s.counter)
        });
    });

    group.finish();
}

/// Benchmark notification cost by listener count
fn benchmark_listener_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("listener_fanout");
    group.throughput(Throughput::Elements(1));

    for listeners in [1_usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(listeners),
            &listeners,
            |b, &listeners| {
                let store = Store::new(BenchReducer);
                let calls = Arc::new(AtomicU64::new(0));
                for _ in 0..listeners {
                    let calls = Arc::clone(&calls);
                    store.subscribe(move || {
                        calls.fetch_add(1, Ordering::Relaxed);
                    });
                }

                b.iter(|| store.dispatch(black_box(BenchAction::Increment)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reducer_execution,
    benchmark_store_throughput,
    benchmark_listener_fanout
);
criterion_main!(benches);
