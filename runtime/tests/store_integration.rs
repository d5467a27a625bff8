//! Integration tests for Store notification semantics.
//!
//! Covers what listeners may do while they run: read state, dispatch,
//! subscribe and unsubscribe. Also covers connect bindings and refusal of
//! dispatches made from inside a reducer.

#![allow(clippy::panic)] // Tests are allowed to panic on failures

use redux_lite_core::{Action, Reducer};
use redux_lite_runtime::{Store, StoreError, Unsubscribe};
use redux_lite_testing::{init_test_tracing, CallLog, StateHistory};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

#[derive(Action, Clone, Debug, PartialEq, Eq)]
enum Msg {
    Push(&'static str),
    Bump,
    #[action(init)]
    Init,
    #[action(unknown)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Log {
    entries: Vec<&'static str>,
    bumps: u32,
}

struct LogReducer;

impl Reducer for LogReducer {
    type State = Log;
    type Action = Msg;

    fn reduce(&self, state: &mut Log, action: &Msg) {
        match action {
            Msg::Push(entry) => state.entries.push(entry),
            Msg::Bump => state.bumps += 1,
            Msg::Init | Msg::Unknown => {},
        }
    }
}

#[test]
fn test_listener_reads_new_state() -> Result<(), StoreError> {
    init_test_tracing();
    let store = Store::new(LogReducer);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let reader = store.clone();
    let sink = Arc::clone(&seen);
    store.subscribe(move || {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reader.state(|s| s.entries.len()));
    });

    store.dispatch(Msg::Push("a"))?;
    store.dispatch(Msg::Push("b"))?;

    assert_eq!(*seen.lock().unwrap_or_else(PoisonError::into_inner), vec![1, 2]);
    Ok(())
}

#[test]
fn test_same_closure_subscribed_twice_runs_twice() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let log = CallLog::new();
    let listener = Arc::new(log.recorder("dup"));

    let first = Arc::clone(&listener);
    let second = Arc::clone(&listener);
    let handle = store.subscribe(move || first());
    store.subscribe(move || second());

    store.dispatch(Msg::Bump)?;
    assert_eq!(log.count("dup"), 2);

    assert!(handle.unsubscribe());
    store.dispatch(Msg::Bump)?;
    assert_eq!(log.count("dup"), 3);
    Ok(())
}

#[test]
fn test_nested_dispatch_completes_before_outer_round_continues() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let log = CallLog::new();

    let nested = store.clone();
    let record_a = log.recorder("A");
    store.subscribe(move || {
        record_a();
        if nested.state(|s| s.bumps) == 1 {
            let _ = nested.dispatch(Msg::Bump);
        }
    });
    store.subscribe(log.recorder("B"));

    store.dispatch(Msg::Bump)?;

    // Outer round: A (dispatches), inner round A B, then outer B
    assert_eq!(log.calls(), vec!["A", "A", "B", "B"]);
    assert_eq!(store.state(|s| s.bumps), 2);
    Ok(())
}

#[test]
fn test_subscribe_during_notification_waits_for_next_round() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let log = CallLog::new();

    let registrar = store.clone();
    let late = log.clone();
    let added = Arc::new(OnceLock::<Unsubscribe>::new());
    let slot = Arc::clone(&added);
    store.subscribe(move || {
        slot.get_or_init(|| registrar.subscribe(late.recorder("late")));
    });

    store.dispatch(Msg::Bump)?;
    assert_eq!(log.count("late"), 0);

    store.dispatch(Msg::Bump)?;
    assert_eq!(log.count("late"), 1);
    assert_eq!(store.listener_count(), 2);
    Ok(())
}

#[test]
fn test_unsubscribe_during_notification_takes_effect_next_round() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let log = CallLog::new();

    let victim: Arc<OnceLock<Unsubscribe>> = Arc::new(OnceLock::new());
    let target = Arc::clone(&victim);
    let record_first = log.recorder("first");
    store.subscribe(move || {
        record_first();
        if let Some(handle) = target.get() {
            handle.unsubscribe();
        }
    });
    let handle = store.subscribe(log.recorder("second"));
    if victim.set(handle).is_err() {
        panic!("victim handle set twice");
    }

    store.dispatch(Msg::Bump)?;
    // The round started with both listeners
    assert_eq!(log.calls(), vec!["first", "second"]);

    store.dispatch(Msg::Bump)?;
    assert_eq!(log.calls(), vec!["first", "second", "first"]);
    Ok(())
}

#[test]
fn test_listener_unsubscribes_itself() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let log = CallLog::new();

    let own: Arc<OnceLock<Unsubscribe>> = Arc::new(OnceLock::new());
    let me = Arc::clone(&own);
    let record = log.recorder("once");
    let handle = store.subscribe(move || {
        record();
        if let Some(handle) = me.get() {
            handle.unsubscribe();
        }
    });
    if own.set(handle).is_err() {
        panic!("handle set twice");
    }

    store.dispatch(Msg::Bump)?;
    store.dispatch(Msg::Bump)?;

    assert_eq!(log.count("once"), 1);
    assert_eq!(store.listener_count(), 0);
    Ok(())
}

#[test]
fn test_handles_outlive_store() {
    let store = Store::new(LogReducer);
    let handle = store.subscribe(|| {});
    drop(store);

    assert!(!handle.unsubscribe());
}

#[test]
fn test_dispatch_from_reducer_is_refused() -> Result<(), StoreError> {
    struct Reentrant {
        store: Arc<OnceLock<Store<Reentrant>>>,
        result: Arc<Mutex<Option<Result<(), StoreError>>>>,
    }

    impl Reducer for Reentrant {
        type State = u32;
        type Action = Msg;

        fn reduce(&self, state: &mut u32, action: &Msg) {
            if let Msg::Bump = action {
                *state += 1;
                if let Some(store) = self.store.get() {
                    let nested = store.dispatch(Msg::Push("nested"));
                    *self.result.lock().unwrap_or_else(PoisonError::into_inner) = Some(nested);
                }
            }
        }
    }

    let slot = Arc::new(OnceLock::new());
    let result = Arc::new(Mutex::new(None));
    let store = Store::new(Reentrant {
        store: Arc::clone(&slot),
        result: Arc::clone(&result),
    });
    if slot.set(store.clone()).is_err() {
        panic!("store slot set twice");
    }

    store.dispatch(Msg::Bump)?;

    assert_eq!(
        *result.lock().unwrap_or_else(PoisonError::into_inner),
        Some(Err(StoreError::DispatchInReducer {
            action_type: "PUSH"
        }))
    );
    assert_eq!(*store.get_state(), 1);

    // The store keeps working afterwards
    store.dispatch(Msg::Bump)?;
    assert_eq!(*store.get_state(), 2);
    Ok(())
}

#[test]
fn test_panicking_reducer_keeps_last_state() -> Result<(), StoreError> {
    struct Fragile;

    impl Reducer for Fragile {
        type State = u32;
        type Action = Msg;

        fn reduce(&self, state: &mut u32, action: &Msg) {
            match action {
                Msg::Bump => *state += 1,
                Msg::Push("boom") => panic!("reducer failure"),
                _ => {},
            }
        }
    }

    let store = Store::new(Fragile);
    store.dispatch(Msg::Bump)?;

    let crashed = {
        let store = store.clone();
        std::thread::spawn(move || store.dispatch(Msg::Push("boom"))).join()
    };
    assert!(crashed.is_err());

    assert_eq!(*store.get_state(), 1);
    store.dispatch(Msg::Bump)?;
    assert_eq!(*store.get_state(), 2);
    Ok(())
}

#[test]
fn test_connect_fires_immediately_then_on_change() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let handle = store.connect(
        |state: &Log| state.entries.len(),
        move |len: &usize| {
            sink.lock().unwrap_or_else(PoisonError::into_inner).push(*len);
        },
    );

    store.dispatch(Msg::Bump)?;
    store.dispatch(Msg::Push("a"))?;
    store.dispatch(Msg::Unknown)?;
    store.dispatch(Msg::Push("b"))?;

    assert_eq!(*seen.lock().unwrap_or_else(PoisonError::into_inner), vec![0, 1, 2]);

    assert!(handle.unsubscribe());
    store.dispatch(Msg::Push("c"))?;
    assert_eq!(seen.lock().unwrap_or_else(PoisonError::into_inner).len(), 3);
    Ok(())
}

#[test]
fn test_connect_callback_may_dispatch() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let writer = store.clone();

    // Keeps entries and bumps in step by dispatching from the callback
    let _binding = store.connect(
        |state: &Log| (state.entries.len(), state.bumps),
        move |&(entries, bumps): &(usize, u32)| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((entries, bumps));
            if bumps < u32::try_from(entries).unwrap_or(u32::MAX) {
                let _ = writer.dispatch(Msg::Bump);
            }
        },
    );

    store.dispatch(Msg::Push("a"))?;

    assert_eq!(store.state(|s| s.bumps), 1);
    assert_eq!(
        *seen.lock().unwrap_or_else(PoisonError::into_inner),
        vec![(0, 0), (1, 0), (1, 1)]
    );
    Ok(())
}

#[test]
fn test_connect_delivers_final_value_under_concurrent_dispatch() {
    const THREADS: u32 = 4;
    const BUMPS: u32 = 25;

    for _ in 0..20 {
        let store = Store::new(LogReducer);
        let last = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last);
        let _binding = store.connect(
            |state: &Log| state.bumps,
            move |bumps: &u32| {
                *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(*bumps);
            },
        );

        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..BUMPS {
                        assert!(store.dispatch(Msg::Bump).is_ok());
                    }
                })
            })
            .collect();
        for worker in workers {
            assert!(worker.join().is_ok());
        }

        assert_eq!(store.state(|s| s.bumps), THREADS * BUMPS);
        assert_eq!(
            *last.lock().unwrap_or_else(PoisonError::into_inner),
            Some(store.state(|s| s.bumps))
        );
    }
}

#[test]
fn test_history_sees_every_published_state() -> Result<(), StoreError> {
    let store = Store::new(LogReducer);
    let history = StateHistory::record(&store);

    store.dispatch(Msg::Push("a"))?;
    store.dispatch(Msg::Unknown)?;
    store.dispatch(Msg::Push("b"))?;

    let states = history.states();
    assert_eq!(states.len(), 3);
    assert_eq!(states[0].entries, vec!["a"]);
    assert_eq!(*states[0], *states[1]);
    assert!(!Arc::ptr_eq(&states[0], &states[1]));
    assert_eq!(states[2].entries, vec!["a", "b"]);
    Ok(())
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_listener_runs_once_per_dispatch(listeners in 0_usize..6, dispatches in 0_usize..12) {
            let store = Store::new(LogReducer);
            let log = CallLog::new();
            for _ in 0..listeners {
                store.subscribe(log.recorder("l"));
            }

            for _ in 0..dispatches {
                prop_assert!(store.dispatch(Msg::Bump).is_ok());
            }

            prop_assert_eq!(log.count("l"), listeners * dispatches);
        }
    }
}
