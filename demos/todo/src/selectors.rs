//! Derived data.

use crate::types::{Todo, VisibilityFilter};
use std::sync::Arc;

/// The todos `filter` lets through, in list order
///
/// Returned entries share their allocation with the state they came from.
#[must_use]
pub fn visible_todos(todos: &[Arc<Todo>], filter: VisibilityFilter) -> Vec<Arc<Todo>> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}
