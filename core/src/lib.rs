//! # Redux Lite Core
//!
//! Core traits and types for a predictable state container.
//!
//! This crate provides the pure half of the architecture: the vocabulary for
//! describing state changes and the functions that apply them.
//!
//! ## Core Concepts
//!
//! - **State**: A single tree of plain data owned by the store
//! - **Action**: A closed enum describing an intended state change
//! - **Reducer**: Pure transition `(State, Action) → State`
//! - **Composition**: Building one root reducer out of many small ones
//!
//! ## Architecture Principles
//!
//! - Single source of truth
//! - State is read-only between transitions
//! - Changes are made with pure functions
//!
//! ## Example
//!
//! ```
//! use redux_lite_core::{Action, Reducer};
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     #[action(rename = "INCREMENT")]
//!     Increment,
//!     #[action(init)]
//!     Init,
//!     #[action(unknown)]
//!     Unknown,
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
//! let next = CounterReducer.reduced(&0, &CounterAction::Increment);
//! assert_eq!(next, 1);
//! assert_eq!(CounterAction::Increment.action_type(), "INCREMENT");
//! ```

// Lets `#[derive(Action)]` resolve `::redux_lite_core` inside this crate.
extern crate self as redux_lite_core;

/// Reducer composition utilities
pub mod composition;

pub use redux_lite_macros::Action;

/// Action module - the closed set of inputs a reducer understands
///
/// Actions are plain data. Each application defines one enum per reducer
/// tree, with one variant per recognized action type, an initialization
/// sentinel and an unknown catch-all.
pub mod action {
    /// Wire name of the sentinel action a store reduces once on creation.
    pub const INIT_ACTION_TYPE: &str = "@@INIT";

    /// Wire name reported by the catch-all variant of an action enum.
    pub const UNKNOWN_ACTION_TYPE: &str = "@@UNKNOWN";

    /// The Action trait - shared behavior of every action enum
    ///
    /// Usually implemented with `#[derive(Action)]`:
    ///
    /// ```
    /// use redux_lite_core::Action;
    ///
    /// #[derive(Action, Clone, Debug, PartialEq)]
    /// enum FilterAction {
    ///     #[action(rename = "SET_VISIBLITY_FILTER")]
    ///     SetFilter { filter: String },
    ///     #[action(init)]
    ///     Init,
    ///     #[action(unknown)]
    ///     Unknown,
    /// }
    ///
    /// assert_eq!(FilterAction::init(), FilterAction::Init);
    /// assert!(!FilterAction::Unknown.is_recognized());
    /// ```
    pub trait Action: Clone + std::fmt::Debug {
        /// The sentinel action reduced once when a store is created without
        /// an explicit initial state
        fn init() -> Self;

        /// The wire name of this action (`"ADD_TODO"`, `"@@INIT"`, ...)
        fn action_type(&self) -> &'static str;

        /// Whether this action is one of the application's own action types.
        ///
        /// The initialization sentinel counts as recognized; the unknown
        /// catch-all does not.
        fn is_recognized(&self) -> bool;
    }
}

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`.
///
/// The trait takes the state by mutable reference so implementations can
/// update only what changes. Callers that need the functional form use
/// [`Reducer::reduced`], and the store never hands out a state value that a
/// reducer is still writing to.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or slice of state) this reducer owns
    /// - `Action`: The action type this reducer processes
    ///
    /// # Rules
    ///
    /// - Every action reaches every reducer; unrecognized ones must leave the
    ///   state untouched
    /// - No I/O, no randomness, no clock reads
    /// - Never fails
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Apply `action` to `state`
        fn reduce(&self, state: &mut Self::State, action: &Self::Action);

        /// Functional form: returns the next state, leaving `state` untouched
        #[must_use]
        fn reduced(&self, state: &Self::State, action: &Self::Action) -> Self::State
        where
            Self::State: Clone,
        {
            let mut next = state.clone();
            self.reduce(&mut next, action);
            next
        }
    }

    impl<R: Reducer + ?Sized> Reducer for Box<R> {
        type State = R::State;
        type Action = R::Action;

        fn reduce(&self, state: &mut Self::State, action: &Self::Action) {
            (**self).reduce(state, action);
        }
    }

    impl<R: Reducer + ?Sized> Reducer for std::sync::Arc<R> {
        type State = R::State;
        type Action = R::Action;

        fn reduce(&self, state: &mut Self::State, action: &Self::Action) {
            (**self).reduce(state, action);
        }
    }
}

// Re-export commonly used items
pub use action::Action;
pub use composition::{combine_reducers, from_fn, scope_reducer};
pub use reducer::Reducer;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Action, Clone, Debug, PartialEq)]
    enum TestAction {
        #[action(rename = "ADD")]
        Add(i32),
        Reset,
        #[action(init)]
        Init,
        #[action(unknown)]
        Unknown,
    }

    struct SumReducer;

    impl Reducer for SumReducer {
        type State = i32;
        type Action = TestAction;

        fn reduce(&self, state: &mut i32, action: &TestAction) {
            match action {
                TestAction::Add(n) => *state += n,
                TestAction::Reset => *state = 0,
                TestAction::Init | TestAction::Unknown => {},
            }
        }
    }

    #[test]
    fn reduced_leaves_input_untouched() {
        let before = 5;
        let after = SumReducer.reduced(&before, &TestAction::Add(3));
        assert_eq!(before, 5);
        assert_eq!(after, 8);
    }

    #[test]
    fn boxed_reducer_delegates() {
        let boxed: Box<dyn Reducer<State = i32, Action = TestAction>> = Box::new(SumReducer);
        let mut state = 1;
        boxed.reduce(&mut state, &TestAction::Add(1));
        assert_eq!(state, 2);
    }

    #[test]
    fn derived_action_types() {
        assert_eq!(TestAction::Add(1).action_type(), "ADD");
        assert_eq!(TestAction::Reset.action_type(), "RESET");
        assert_eq!(TestAction::Init.action_type(), action::INIT_ACTION_TYPE);
        assert_eq!(TestAction::Unknown.action_type(), action::UNKNOWN_ACTION_TYPE);
        assert_eq!(TestAction::init(), TestAction::Init);
    }

    #[test]
    fn unknown_is_not_recognized() {
        assert!(TestAction::Reset.is_recognized());
        assert!(TestAction::Init.is_recognized());
        assert!(!TestAction::Unknown.is_recognized());
    }
}
