//! # Redux Lite Runtime
//!
//! The Store: holds the current state tree, applies the root reducer on
//! every dispatch and notifies listeners.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and the reducer; the only place state changes
//! - **Listeners**: Ordered callbacks run synchronously after each dispatch
//! - **Connect**: Listeners bound to a derived value that fire only on change
//!
//! ## Example
//!
//! ```
//! use redux_lite_core::{Action, Reducer};
//! use redux_lite_runtime::Store;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     #[action(init)]
//!     Init,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i64;
//!     type Action = CounterAction;
//!
//!     fn reduce(&self, state: &mut i64, action: &CounterAction) {
//!         if let CounterAction::Increment = action {
//!             *state += 1;
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), redux_lite_runtime::StoreError> {
//! let store = Store::new(CounterReducer);
//!
//! let renders = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&renders);
//! store.subscribe(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! store.dispatch(CounterAction::Increment)?;
//! assert_eq!(*store.get_state(), 1);
//! assert_eq!(renders.load(Ordering::SeqCst), 1);
//! # Ok(())
//! # }
//! ```

use redux_lite_core::{action::Action, reducer::Reducer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Listener registry and unsubscribe handles
pub mod listeners;

/// Store metrics
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Reducers themselves never fail; these errors come from the store
    /// refusing a dispatch.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The action is not one of the application's action types
        ///
        /// Only returned by stores configured with
        /// [`StoreConfig::with_reject_unknown_actions`](crate::StoreConfig::with_reject_unknown_actions).
        /// The default store ignores such actions instead.
        #[error("Unrecognized action rejected: {action_type}")]
        InvalidAction {
            /// Wire name reported by the rejected action
            action_type: &'static str,
        },

        /// A reducer tried to dispatch to the store that is running it
        ///
        /// Reducers must be pure. The nested dispatch is refused instead of
        /// deadlocking.
        #[error("Reducers may not dispatch actions (attempted {action_type})")]
        DispatchInReducer {
            /// Wire name of the refused action
            action_type: &'static str,
        },
    }
}

pub use error::StoreError;
pub use listeners::{ListenerId, Unsubscribe};

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use redux_lite_runtime::StoreConfig;
///
/// let config = StoreConfig::new("todo-app").with_reject_unknown_actions(true);
/// assert_eq!(config.name, "todo-app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name used to label logs and metrics
    pub name: String,
    /// Refuse actions whose `is_recognized()` is false with
    /// [`StoreError::InvalidAction`] instead of reducing them as no-ops
    pub reject_unknown_actions: bool,
}

impl StoreConfig {
    /// Create a permissive configuration with the given store name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reject_unknown_actions: false,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether unrecognized actions are rejected
    #[must_use]
    pub const fn with_reject_unknown_actions(mut self, reject: bool) -> Self {
        self.reject_unknown_actions = reject;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("store")
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        lock, Action, Arc, Mutex, PoisonError, Reducer, RwLock, StoreConfig, StoreError,
    };
    use crate::listeners::{Listener, ListenerRegistry, Unsubscribe};
    use std::fmt;
    use std::thread::{self, ThreadId};
    use std::time::Instant;

    /// The Store - owner of the state tree
    ///
    /// The Store manages:
    /// 1. State (an immutable `Arc` snapshot, replaced on every dispatch)
    /// 2. Reducer (the root transition function)
    /// 3. Listeners (notified synchronously after each dispatch)
    ///
    /// Cloning a `Store` yields another handle to the same state and
    /// listeners. Independent stores share nothing.
    ///
    /// # Lifecycle
    ///
    /// A store is ready as soon as its constructor returns and stays ready
    /// for as long as any handle exists.
    pub struct Store<R>
    where
        R: Reducer,
    {
        inner: Arc<Inner<R>>,
    }

    struct Inner<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: RwLock<Arc<R::State>>,
        listeners: Arc<Mutex<ListenerRegistry>>,
        /// Serializes reductions across handles and threads
        dispatch_lock: Mutex<()>,
        /// Thread currently inside the reducer, if any
        reducing_on: Mutex<Option<ThreadId>>,
        config: StoreConfig,
    }

    /// Marks a thread as the holder of a slot, cleared on drop even if the
    /// guarded code panics
    struct ThreadSlotGuard<'a>(&'a Mutex<Option<ThreadId>>);

    impl<'a> ThreadSlotGuard<'a> {
        fn enter(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
            *lock(slot) = Some(thread);
            Self(slot)
        }
    }

    impl Drop for ThreadSlotGuard<'_> {
        fn drop(&mut self) {
            *lock(self.0) = None;
        }
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::State: Clone,
        R::Action: Action,
    {
        /// Create a store seeded with the reducer's defaults
        ///
        /// The initial state is `State::default()` reduced once by the
        /// initialization sentinel (`Action::init()`), the equivalent of
        /// calling the reducer with no state.
        #[must_use]
        pub fn new(reducer: R) -> Self
        where
            R::State: Default,
        {
            Self::with_config(reducer, StoreConfig::default())
        }

        /// Create a store seeded with the reducer's defaults and a custom
        /// configuration
        #[must_use]
        pub fn with_config(reducer: R, config: StoreConfig) -> Self
        where
            R::State: Default,
        {
            let mut state = R::State::default();
            reducer.reduce(&mut state, &R::Action::init());
            Self::from_parts(reducer, state, config)
        }

        /// Create a store with an explicit initial state
        ///
        /// The initialization sentinel is not reduced.
        #[must_use]
        pub fn with_state(reducer: R, initial_state: R::State) -> Self {
            Self::from_parts(reducer, initial_state, StoreConfig::default())
        }

        /// Create a store with an explicit initial state and configuration
        #[must_use]
        pub fn with_state_and_config(
            reducer: R,
            initial_state: R::State,
            config: StoreConfig,
        ) -> Self {
            Self::from_parts(reducer, initial_state, config)
        }

        fn from_parts(reducer: R, state: R::State, config: StoreConfig) -> Self {
            tracing::info!(
                store = %config.name,
                reject_unknown_actions = config.reject_unknown_actions,
                "Store created"
            );

            Self {
                inner: Arc::new(Inner {
                    reducer,
                    state: RwLock::new(Arc::new(state)),
                    listeners: Arc::new(Mutex::new(ListenerRegistry::new(config.name.clone()))),
                    dispatch_lock: Mutex::new(()),
                    reducing_on: Mutex::new(None),
                    config,
                }),
            }
        }

        /// Current state snapshot
        ///
        /// The same `Arc` is returned until the next dispatch, so
        /// `Arc::ptr_eq` tells whether anything was dispatched in between.
        #[must_use]
        pub fn get_state(&self) -> Arc<R::State> {
            self.inner.snapshot()
        }

        /// Read a projection of the current state
        ///
        /// # Example
        ///
        /// ```
        /// # use redux_lite_core::{Action, Reducer};
        /// # use redux_lite_runtime::Store;
        /// # #[derive(Action, Clone, Debug)]
        /// # enum TodoAction {
        /// #     AddTodo(&'static str),
        /// #     #[action(init)]
        /// #     Init,
        /// # }
        /// # #[derive(Clone, Default)]
        /// # struct TodoState {
        /// #     todos: Vec<&'static str>,
        /// # }
        /// # struct TodoReducer;
        /// # impl Reducer for TodoReducer {
        /// #     type State = TodoState;
        /// #     type Action = TodoAction;
        /// #     fn reduce(&self, state: &mut TodoState, action: &TodoAction) {
        /// #         if let TodoAction::AddTodo(text) = action {
        /// #             state.todos.push(text);
        /// #         }
        /// #     }
        /// # }
        /// # fn main() -> Result<(), redux_lite_runtime::StoreError> {
        /// let store = Store::new(TodoReducer);
        /// store.dispatch(TodoAction::AddTodo("Learn Redux"))?;
        ///
        /// let count = store.state(|s| s.todos.len());
        /// assert_eq!(count, 1);
        /// # Ok(())
        /// # }
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            f(&self.inner.snapshot())
        }

        /// The store's configuration
        #[must_use]
        pub fn config(&self) -> &StoreConfig {
            &self.inner.config
        }

        /// Number of listeners currently subscribed
        #[must_use]
        pub fn listener_count(&self) -> usize {
            lock(&self.inner.listeners).len()
        }

        /// Dispatch an action
        ///
        /// 1. Reduces the action against the current state, producing a new tree
        /// 2. Publishes the new tree as the current state
        /// 3. Calls every listener, in registration order, from a snapshot of
        ///    the listener list taken after step 2
        ///
        /// Everything happens before `dispatch` returns. Listeners may read
        /// state, subscribe, unsubscribe and dispatch again; a nested dispatch
        /// completes its own round before the outer round continues.
        ///
        /// # Errors
        ///
        /// - [`StoreError::InvalidAction`] if the store rejects unknown
        ///   actions and `action` is not recognized
        /// - [`StoreError::DispatchInReducer`] if called from inside this
        ///   store's reducer
        ///
        /// # Panics
        ///
        /// A panicking reducer or listener propagates to the caller. The
        /// state is left at the last completed transition.
        #[tracing::instrument(
            skip(self, action),
            name = "store_dispatch",
            fields(store = %self.inner.config.name, action_type = action.action_type())
        )]
        pub fn dispatch(&self, action: R::Action) -> Result<(), StoreError> {
            let action_type = action.action_type();
            let name = &self.inner.config.name;

            if self.inner.config.reject_unknown_actions && !action.is_recognized() {
                crate::metrics::counter!(
                    "store_actions_rejected_total",
                    "store" => name.clone(),
                    "action_type" => action_type
                )
                .increment(1);
                tracing::warn!(action = ?action, "Rejected unrecognized action");
                return Err(StoreError::InvalidAction { action_type });
            }

            let current_thread = thread::current().id();
            if *lock(&self.inner.reducing_on) == Some(current_thread) {
                tracing::error!("Dispatch attempted from inside the reducer");
                return Err(StoreError::DispatchInReducer { action_type });
            }

            {
                let _serial = lock(&self.inner.dispatch_lock);
                let _reducing = ThreadSlotGuard::enter(&self.inner.reducing_on, current_thread);

                let started = Instant::now();
                let previous = self.inner.snapshot();
                let next = self.inner.reducer.reduced(&previous, &action);
                *self
                    .inner
                    .state
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Arc::new(next);

                crate::metrics::histogram!("store_reduce_duration_seconds", "store" => name.clone())
                    .record(started.elapsed().as_secs_f64());
            }

            crate::metrics::counter!(
                "store_actions_dispatched_total",
                "store" => name.clone(),
                "action_type" => action_type
            )
            .increment(1);
            tracing::debug!("Action reduced");

            self.notify();
            Ok(())
        }

        /// Subscribe a listener
        ///
        /// The listener is called with no arguments after every dispatch and
        /// reads whatever it needs through a store handle it captured. The
        /// same closure may be subscribed more than once; each registration
        /// is independent.
        ///
        /// A listener added during a notification round is first called in
        /// the next round.
        pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
        where
            F: Fn() + Send + Sync + 'static,
        {
            let listener: Arc<Listener> = Arc::new(listener);
            let id = lock(&self.inner.listeners).insert(listener);
            tracing::trace!(store = %self.inner.config.name, listener = %id, "Listener subscribed");
            Unsubscribe::new(&self.inner.listeners, id)
        }

        /// Bind a callback to a value derived from state
        ///
        /// `select` maps the state tree to the value a view cares about.
        /// `on_change` runs once immediately with the current value, then
        /// after a dispatch only if the selected value differs from the one
        /// it last saw.
        ///
        /// If `on_change` dispatches, the resulting change is delivered once
        /// it returns rather than through a nested call. Dispatches from
        /// other threads wait for the running callback, so the last value
        /// delivered always matches the latest state.
        ///
        /// # Example
        ///
        /// ```
        /// # use redux_lite_core::{Action, Reducer};
        /// # use redux_lite_runtime::Store;
        /// # #[derive(Action, Clone, Debug)]
        /// # enum TodoAction {
        /// #     AddTodo(&'static str),
        /// #     #[action(init)]
        /// #     Init,
        /// # }
        /// # #[derive(Clone, Default)]
        /// # struct TodoState {
        /// #     todos: Vec<&'static str>,
        /// # }
        /// # struct TodoReducer;
        /// # impl Reducer for TodoReducer {
        /// #     type State = TodoState;
        /// #     type Action = TodoAction;
        /// #     fn reduce(&self, state: &mut TodoState, action: &TodoAction) {
        /// #         if let TodoAction::AddTodo(text) = action {
        /// #             state.todos.push(text);
        /// #         }
        /// #     }
        /// # }
        /// # fn main() -> Result<(), redux_lite_runtime::StoreError> {
        /// let store = Store::new(TodoReducer);
        /// # use std::sync::{Arc, Mutex};
        /// let renders = Arc::new(Mutex::new(Vec::new()));
        /// let sink = Arc::clone(&renders);
        /// let handle = store.connect(
        ///     |state: &TodoState| state.todos.len(),
        ///     move |count: &usize| sink.lock().unwrap().push(*count),
        /// );
        ///
        /// store.dispatch(TodoAction::AddTodo("Learn Redux"))?;
        /// store.dispatch(TodoAction::Init)?;
        /// assert_eq!(*renders.lock().unwrap(), vec![0, 1]);
        ///
        /// handle.unsubscribe();
        /// # Ok(())
        /// # }
        /// ```
        pub fn connect<T, S, F>(&self, select: S, on_change: F) -> Unsubscribe
        where
            R: Send + Sync + 'static,
            R::State: Send + Sync + 'static,
            T: PartialEq + Send + 'static,
            S: Fn(&R::State) -> T + Send + Sync + 'static,
            F: FnMut(&T) + Send + 'static,
        {
            let mut on_change = on_change;
            let initial = self.state(&select);
            on_change(&initial);

            let binding = Mutex::new((initial, on_change));
            let owner = Mutex::new(None::<ThreadId>);
            let store = Arc::downgrade(&self.inner);

            self.subscribe(move || {
                let Some(inner) = store.upgrade() else {
                    return;
                };

                let current_thread = thread::current().id();
                // Re-entered from our own `on_change`; the outer call
                // re-selects once the callback returns.
                if *lock(&owner) == Some(current_thread) {
                    return;
                }

                let mut guard = lock(&binding);
                let _owner = ThreadSlotGuard::enter(&owner, current_thread);
                let (last, on_change) = &mut *guard;

                loop {
                    let next = select(&inner.snapshot());
                    if next == *last {
                        break;
                    }
                    on_change(&next);
                    *last = next;
                }
            })
        }

        fn notify(&self) {
            let listeners = lock(&self.inner.listeners).snapshot();

            tracing::trace!(listeners = listeners.len(), "Notifying listeners");
            crate::metrics::counter!(
                "store_listeners_notified_total",
                "store" => self.inner.config.name.clone()
            )
            .increment(listeners.len() as u64);

            for listener in &listeners {
                listener();
            }
        }
    }

    impl<R> Inner<R>
    where
        R: Reducer,
    {
        fn snapshot(&self) -> Arc<R::State> {
            Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
        }
    }

    impl<R> Clone for Store<R>
    where
        R: Reducer,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<R> fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Store")
                .field("name", &self.inner.config.name)
                .field("state", &self.inner.snapshot())
                .field("listeners", &lock(&self.inner.listeners).len())
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;
