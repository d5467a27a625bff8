//! Action creators.
//!
//! Views build actions through these helpers instead of spelling out the
//! variants. Todo ids are handed out here, never by the reducers.

use crate::types::{TodoAction, TodoId, VisibilityFilter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of todo ids, starting at 0
///
/// Shared by reference; every call to [`IdAllocator::next_id`] returns a
/// fresh id for the lifetime of the allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 0
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create an allocator whose first id is `first`
    ///
    /// Used when resuming after todos restored from elsewhere.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Take the next id
    pub fn next_id(&self) -> TodoId {
        TodoId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// `ADD_TODO` for `text` with a freshly allocated id
    pub fn add_todo(&self, text: impl Into<String>) -> TodoAction {
        TodoAction::AddTodo {
            id: self.next_id(),
            text: text.into(),
        }
    }
}

/// `TOGGLE_TODO` for `id`
#[must_use]
pub const fn toggle_todo(id: TodoId) -> TodoAction {
    TodoAction::ToggleTodo { id }
}

/// `SET_VISIBLITY_FILTER` to `filter`
#[must_use]
pub const fn set_visibility_filter(filter: VisibilityFilter) -> TodoAction {
    TodoAction::SetVisibilityFilter { filter }
}
