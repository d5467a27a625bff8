//! Reducer logic for the Todo example.
//!
//! Three small reducers, each owning one slice of [`TodoState`], combined
//! into the root reducer by [`todo_app`].

use crate::types::{toggle_todo, Todo, TodoAction, TodoState, VisibilityFilter};
use redux_lite_core::composition::CombinedReducer;
use redux_lite_core::{combine_reducers, scope_reducer, Reducer};
use std::sync::Arc;

/// Reducer for a single todo item
///
/// - `ADD_TODO` replaces the item with a fresh, incomplete todo
/// - `TOGGLE_TODO` replaces it with a toggled copy, but only when the ids
///   match; otherwise the same allocation is kept
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = Arc<Todo>;
    type Action = TodoAction;

    fn reduce(&self, state: &mut Arc<Todo>, action: &TodoAction) {
        match action {
            TodoAction::AddTodo { id, text } => {
                *state = Arc::new(Todo::new(*id, text.clone()));
            },
            TodoAction::ToggleTodo { id } if state.id == *id => {
                let toggled = toggle_todo(state);
                *state = Arc::new(toggled);
            },
            _ => {},
        }
    }
}

/// Reducer for the todo list
///
/// Ids are not checked for uniqueness: an `ADD_TODO` with an id already in
/// the list appends a second todo with that id, and a later `TOGGLE_TODO`
/// flips both.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = Vec<Arc<Todo>>;
    type Action = TodoAction;

    fn reduce(&self, state: &mut Vec<Arc<Todo>>, action: &TodoAction) {
        match action {
            TodoAction::AddTodo { .. } => {
                let mut todo = Arc::default();
                TodoReducer.reduce(&mut todo, action);
                state.push(todo);
            },
            TodoAction::ToggleTodo { .. } => {
                for todo in state.iter_mut() {
                    TodoReducer.reduce(todo, action);
                }
            },
            _ => {},
        }
    }
}

/// Reducer for the visibility filter
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;

    fn reduce(&self, state: &mut VisibilityFilter, action: &TodoAction) {
        if let TodoAction::SetVisibilityFilter { filter } = action {
            *state = *filter;
        }
    }
}

/// The root reducer
///
/// `todos` is owned by [`TodosReducer`] and `visibility_filter` by
/// [`VisibilityFilterReducer`]. Both see every action.
#[must_use]
pub fn todo_app() -> CombinedReducer<TodoState, TodoAction> {
    combine_reducers(vec![
        Box::new(scope_reducer(TodosReducer, |s: &mut TodoState| &mut s.todos)),
        Box::new(scope_reducer(VisibilityFilterReducer, |s: &mut TodoState| {
            &mut s.visibility_filter
        })),
    ])
}
