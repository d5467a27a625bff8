//! # Counter Example
//!
//! The smallest useful Redux Lite application: one number, two actions.
//!
//! This example showcases:
//! - A reducer over a plain integer state
//! - Deriving [`Action`] for a closed action enum with a catch-all
//! - The JSON wire format (`{"type": "INCREMENT"}`)
//! - Rendering from a store listener
//!
//! ## Example
//!
//! ```
//! use counter::{CounterAction, CounterReducer};
//! use redux_lite_runtime::Store;
//!
//! # fn main() -> Result<(), redux_lite_runtime::StoreError> {
//! let store = Store::new(CounterReducer);
//!
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Decrement)?;
//!
//! assert_eq!(*store.get_state(), 1);
//! # Ok(())
//! # }
//! ```

use redux_lite_core::{Action, Reducer};
use serde::{Deserialize, Serialize};

/// Counter state: the current count, starting at 0
pub type CounterState = i64;

/// Counter actions
///
/// Serialized as `{"type": "INCREMENT"}` and so on. Any other `type`
/// decodes to [`CounterAction::Unknown`], which the reducer ignores.
#[derive(Action, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAction {
    /// Add one to the count
    Increment,
    /// Subtract one from the count
    Decrement,
    /// Store initialization
    #[action(init)]
    #[serde(rename = "@@INIT")]
    Init,
    /// An action this application does not handle
    #[action(unknown)]
    #[serde(other, rename = "@@UNKNOWN")]
    Unknown,
}

/// Counter reducer
///
/// Saturates at the bounds of `i64` rather than overflowing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(&self, state: &mut CounterState, action: &CounterAction) {
        match action {
            CounterAction::Increment => *state = state.saturating_add(1),
            CounterAction::Decrement => *state = state.saturating_sub(1),
            CounterAction::Init | CounterAction::Unknown => {},
        }
    }
}

/// The line the console renderer prints for `count`
#[must_use]
pub fn render_count(count: CounterState) -> String {
    format!("Current Count: {count}")
}
