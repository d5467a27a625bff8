//! # Redux Lite Testing
//!
//! Testing utilities and helpers for Redux Lite.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`StoreTest`]: Given-When-Then harness for a running store
//! - [`mocks::CallLog`]: Records listener invocations in order
//! - [`helpers::StateHistory`]: Captures every state a store publishes
//! - [`helpers::init_test_tracing`]: Log output for failing tests
//!
//! ## Example
//!
//! ```
//! use redux_lite_core::{Action, Reducer};
//! use redux_lite_runtime::{Store, StoreError};
//! use redux_lite_testing::CallLog;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[action(init)]
//!     Init,
//!     #[action(unknown)]
//!     Unknown,
//! }
//!
//! struct TodoReducer;
//!
//! impl Reducer for TodoReducer {
//!     type State = Vec<String>;
//!     type Action = TodoAction;
//!
//!     fn reduce(&self, _state: &mut Vec<String>, _action: &TodoAction) {}
//! }
//!
//! # fn main() -> Result<(), StoreError> {
//! let store = Store::new(TodoReducer);
//! let log = CallLog::new();
//! store.subscribe(log.recorder("a"));
//! store.subscribe(log.recorder("b"));
//!
//! store.dispatch(TodoAction::Unknown)?;
//! assert_eq!(log.calls(), vec!["a", "b"]);
//! # Ok(())
//! # }
//! ```



/// Mock listeners for store tests
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};

    /// Shared, ordered log of listener calls
    ///
    /// Each recorder appends its label when called, so the log shows both
    /// how often and in what order listeners ran.
    ///
    /// # Example
    ///
    /// ```
    /// use redux_lite_testing::mocks::CallLog;
    ///
    /// let log = CallLog::new();
    /// let a = log.recorder("a");
    /// let b = log.recorder("b");
    /// a();
    /// b();
    /// a();
    /// assert_eq!(log.calls(), vec!["a", "b", "a"]);
    /// assert_eq!(log.count("a"), 2);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct CallLog {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A listener that appends `label` to this log
        #[must_use]
        pub fn recorder(&self, label: &'static str) -> impl Fn() + Send + Sync + 'static {
            let calls = Arc::clone(&self.calls);
            move || {
                calls
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(label);
            }
        }

        /// All recorded calls, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// How many times `label` was recorded
        #[must_use]
        pub fn count(&self, label: &str) -> usize {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|call| **call == label)
                .count()
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use redux_lite_core::{action::Action, reducer::Reducer};
    use redux_lite_runtime::{Store, Unsubscribe};
    use std::sync::{Arc, Mutex, Once, PoisonError};

    /// Every state a store published after [`StateHistory::record`] was called
    ///
    /// Snapshots are the store's own `Arc`s, so tests can check sharing with
    /// `Arc::ptr_eq` as well as values.
    pub struct StateHistory<S> {
        states: Arc<Mutex<Vec<Arc<S>>>>,
        handle: Unsubscribe,
    }

    impl<S> StateHistory<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        /// Start recording the states published by `store`
        #[must_use]
        pub fn record<R>(store: &Store<R>) -> Self
        where
            R: Reducer<State = S> + Send + Sync + 'static,
            R::Action: Action,
        {
            let states = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&states);
            let reader = store.clone();

            let handle = store.subscribe(move || {
                sink.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(reader.get_state());
            });

            Self { states, handle }
        }

        /// Recorded snapshots, oldest first
        #[must_use]
        pub fn states(&self) -> Vec<Arc<S>> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of notifications observed
        #[must_use]
        pub fn len(&self) -> usize {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Whether nothing was observed yet
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Stop recording; returns false if already stopped
        pub fn stop(&self) -> bool {
            self.handle.unsubscribe()
        }
    }

    static TRACING: Once = Once::new();

    /// Install a test-friendly tracing subscriber once per process
    ///
    /// Honors `RUST_LOG`; defaults to `warn`. Output goes through the test
    /// harness capture.
    pub fn init_test_tracing() {
        TRACING.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        });
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, StateHistory};
pub use mocks::CallLog;
pub use reducer_test::ReducerTest;
pub use store_test::StoreTest;
