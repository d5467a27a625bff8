//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one field of a larger state
//! - **`from_fn`**: Lift a plain function into a [`Reducer`]
//!
//! A root reducer is usually a combination of scoped reducers, one per field
//! of the state tree. Each of them sees every action.
//!
//! # Examples
//!
//! ```
//! use redux_lite_core::{combine_reducers, from_fn, scope_reducer, Reducer};
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     count: i32,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! let count = from_fn(|count: &mut i32, action: &AppAction| {
//!     if let AppAction::Increment = action {
//!         *count += 1;
//!     }
//! });
//! let name = from_fn(|name: &mut String, action: &AppAction| {
//!     if let AppAction::SetName(new_name) = action {
//!         name.clone_from(new_name);
//!     }
//! });
//!
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer(count, |s: &mut AppState| &mut s.count)),
//!     Box::new(scope_reducer(name, |s: &mut AppState| &mut s.name)),
//! ]);
//!
//! let mut state = AppState::default();
//! root.reduce(&mut state, &AppAction::Increment);
//! root.reduce(&mut state, &AppAction::SetName("Alice".to_string()));
//! assert_eq!(state.count, 1);
//! assert_eq!(state.name, "Alice");
//! ```

use crate::reducer::Reducer;
use std::fmt;
use std::marker::PhantomData;

/// A boxed reducer over state `S` and action `A`.
pub type BoxedReducer<S, A> = Box<dyn Reducer<State = S, Action = A> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, in the order given, on the same state and
/// the same action.
///
/// # Examples
///
/// ```
/// use redux_lite_core::{combine_reducers, from_fn, Reducer};
///
/// let double = from_fn(|n: &mut i32, _: &()| *n *= 2);
/// let plus_one = from_fn(|n: &mut i32, _: &()| *n += 1);
///
/// let combined = combine_reducers(vec![Box::new(double), Box::new(plus_one)]);
///
/// let mut state = 3;
/// combined.reduce(&mut state, &());
/// assert_eq!(state, 7);
/// ```
#[must_use]
pub fn combine_reducers<S, A>(reducers: Vec<BoxedReducer<S, A>>) -> CombinedReducer<S, A> {
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A> {
    reducers: Vec<BoxedReducer<S, A>>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether the combination is empty (and therefore the identity)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A> fmt::Debug for CombinedReducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A> {
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) {
        for reducer in &self.reducers {
            reducer.reduce(state, action);
        }
    }
}

/// Scopes a reducer to operate on one field of a larger state.
///
/// `lens` borrows the child state out of the parent. The child reducer
/// updates it in place, so sibling fields are never touched or copied.
///
/// # Examples
///
/// ```
/// use redux_lite_core::{from_fn, scope_reducer, Reducer};
///
/// #[derive(Default)]
/// struct Parent {
///     counter: i32,
///     other: String,
/// }
///
/// let counter = from_fn(|n: &mut i32, delta: &i32| *n += delta);
/// let scoped = scope_reducer(counter, |p: &mut Parent| &mut p.counter);
///
/// let mut state = Parent::default();
/// scoped.reduce(&mut state, &5);
/// assert_eq!(state.counter, 5);
/// assert!(state.other.is_empty());
/// ```
pub fn scope_reducer<S, R>(reducer: R, lens: fn(&mut S) -> &mut R::State) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        lens,
        _phantom: PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    reducer: R,
    lens: fn(&mut S) -> &mut R::State,
    _phantom: PhantomData<fn(&mut S)>,
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    R: Reducer,
{
    type State = S;
    type Action = R::Action;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) {
        self.reducer.reduce((self.lens)(state), action);
    }
}

/// Lifts a function `(&mut S, &A)` into a [`Reducer`].
///
/// Handy for small leaf reducers that carry no configuration of their own.
pub fn from_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
where
    F: Fn(&mut S, &A),
{
    FnReducer {
        f,
        _phantom: PhantomData,
    }
}

/// A reducer backed by a plain function or closure.
///
/// Created by [`from_fn`].
pub struct FnReducer<S, A, F> {
    f: F,
    _phantom: PhantomData<fn(&mut S, &A)>,
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
    F: Fn(&mut S, &A),
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) {
        (self.f)(state, action);
    }
}
