//! Todo list application built on the Redux Lite store.
//!
//! This example shows a complete, if console-bound, Redux-style application:
//!
//! - Plain state tree ([`TodoState`]) and a closed action enum ([`TodoAction`])
//! - Small reducers composed into one root reducer ([`todo_app`])
//! - Action creators owning id allocation ([`actions`])
//! - Derived data ([`selectors`]) and a connected text view ([`view`])
//! - Replay of recorded JSON actions ([`replay`])
//!
//! # Quick Start
//!
//! ```
//! use todo::{actions, todo_app, view, VisibilityFilter};
//! use redux_lite_runtime::Store;
//!
//! # fn main() -> Result<(), redux_lite_runtime::StoreError> {
//! let store = Store::new(todo_app());
//! let ids = actions::IdAllocator::new();
//!
//! store.dispatch(ids.add_todo("Learn Redux"))?;
//! store.dispatch(ids.add_todo("Go shopping"))?;
//! store.dispatch(actions::toggle_todo(0.into()))?;
//! store.dispatch(actions::set_visibility_filter(VisibilityFilter::ShowActive))?;
//!
//! let state = store.get_state();
//! assert_eq!(state.completed_count(), 1);
//! assert_eq!(
//!     view::render_app(&state),
//!     "[ ] Go shopping\nShow: [All], Active, [Completed]"
//! );
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod reducer;
pub mod replay;
pub mod selectors;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use reducer::{todo_app, TodoReducer, TodosReducer, VisibilityFilterReducer};
pub use types::{Todo, TodoAction, TodoId, TodoState, VisibilityFilter};
pub use view::TodoStore;
