//! Console view for the todo application.
//!
//! Presentational functions turn plain data into text and know nothing about
//! the store. [`connect_view`] is the container: it derives a [`ViewModel`]
//! from the store and re-renders whenever that model changes.

use crate::selectors::visible_todos;
use crate::types::{Todo, TodoAction, TodoState, VisibilityFilter};
use redux_lite_core::composition::CombinedReducer;
use redux_lite_runtime::{Store, Unsubscribe};
use std::sync::Arc;

/// The store type the todo application runs on
pub type TodoStore = Store<CombinedReducer<TodoState, TodoAction>>;

/// One filter link in the footer
///
/// The active filter renders as plain text, the others as `[link]`.
#[must_use]
pub fn render_filter_link(filter: VisibilityFilter, active: VisibilityFilter) -> String {
    if filter == active {
        filter.label().to_string()
    } else {
        format!("[{}]", filter.label())
    }
}

/// The footer line, e.g. `Show: All, [Active], [Completed]`
#[must_use]
pub fn render_footer(active: VisibilityFilter) -> String {
    let links: Vec<String> = VisibilityFilter::ALL
        .iter()
        .map(|filter| render_filter_link(*filter, active))
        .collect();
    format!("Show: {}", links.join(", "))
}

/// One todo, e.g. `[x] Learn Redux`
#[must_use]
pub fn render_todo(todo: &Todo) -> String {
    let marker = if todo.completed { 'x' } else { ' ' };
    format!("[{marker}] {}", todo.text)
}

/// The todo list, one todo per line
#[must_use]
pub fn render_todo_list(todos: &[Arc<Todo>]) -> String {
    todos.iter().map(|todo| render_todo(todo) + "\n").collect()
}

/// What the view shows: the visible todos and the active filter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewModel {
    /// Todos passing the active filter
    pub visible: Vec<Arc<Todo>>,
    /// The active filter
    pub filter: VisibilityFilter,
}

impl ViewModel {
    /// Derive the model from the state tree
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        Self {
            visible: visible_todos(&state.todos, state.visibility_filter),
            filter: state.visibility_filter,
        }
    }

    /// Render the whole application
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}{}",
            render_todo_list(&self.visible),
            render_footer(self.filter)
        )
    }
}

/// Render the whole application for `state`
#[must_use]
pub fn render_app(state: &TodoState) -> String {
    ViewModel::from_state(state).render()
}

/// Connect a renderer to `store`
///
/// `output` receives the rendered application once immediately and again
/// after every dispatch that changes what is visible.
pub fn connect_view<F>(store: &TodoStore, mut output: F) -> Unsubscribe
where
    F: FnMut(&str) + Send + 'static,
{
    store.connect(ViewModel::from_state, move |model: &ViewModel| {
        tracing::debug!(visible = model.visible.len(), filter = %model.filter, "Rendering");
        output(&model.render());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn todo(id: u64, text: &str, completed: bool) -> Arc<Todo> {
        Arc::new(Todo {
            id: TodoId::new(id),
            text: text.to_string(),
            completed,
        })
    }

    #[test]
    fn test_footer_marks_active_filter() {
        assert_eq!(
            render_footer(VisibilityFilter::ShowAll),
            "Show: All, [Active], [Completed]"
        );
        assert_eq!(
            render_footer(VisibilityFilter::ShowCompleted),
            "Show: [All], [Active], Completed"
        );
    }

    #[test]
    fn test_todo_markers() {
        assert_eq!(render_todo(&todo(0, "Learn Redux", true)), "[x] Learn Redux");
        assert_eq!(render_todo(&todo(1, "Go shopping", false)), "[ ] Go shopping");
    }

    #[test]
    fn test_todo_list_one_line_per_todo() {
        let todos = [todo(0, "Learn Redux", true), todo(1, "Go shopping", false)];

        assert_eq!(
            render_todo_list(&todos),
            "[x] Learn Redux\n[ ] Go shopping\n"
        );
        assert_eq!(render_todo_list(&[]), "");
    }

    #[test]
    fn test_render_app_applies_filter() {
        let state = TodoState {
            todos: vec![todo(0, "Learn Redux", true), todo(1, "Go shopping", false)],
            visibility_filter: VisibilityFilter::ShowActive,
        };

        assert_eq!(
            render_app(&state),
            "[ ] Go shopping\nShow: [All], Active, [Completed]"
        );
    }

    #[test]
    fn test_render_empty_app() {
        assert_eq!(
            render_app(&TodoState::default()),
            "Show: All, [Active], [Completed]"
        );
    }
}
