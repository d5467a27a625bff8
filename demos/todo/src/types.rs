//! Domain types for the Todo example.
//!
//! The whole application state is one plain tree: a list of todos and the
//! filter that decides which of them are shown.

use redux_lite_core::Action;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of a todo item
///
/// Assigned by [`IdAllocator`](crate::actions::IdAllocator) when the
/// `ADD_TODO` action is created. Reducers trust it and never check it for
/// uniqueness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier copied from the `ADD_TODO` action
    pub id: TodoId,
    /// What needs doing
    pub text: String,
    /// Whether it is done
    pub completed: bool,
}

impl Todo {
    /// Creates an incomplete todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Returns a copy of `todo` with `completed` flipped; `todo` is untouched.
#[must_use]
pub fn toggle_todo(todo: &Todo) -> Todo {
    Todo {
        completed: !todo.completed,
        ..todo.clone()
    }
}

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    /// Every todo
    #[default]
    ShowAll,
    /// Todos not yet completed
    ShowActive,
    /// Completed todos
    ShowCompleted,
}

impl VisibilityFilter {
    /// All filters, in footer order
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    /// Wire name, e.g. `SHOW_ACTIVE`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
        }
    }

    /// Label shown in the footer
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }

    /// Whether `todo` passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::ShowAll => true,
            Self::ShowActive => !todo.completed,
            Self::ShowCompleted => todo.completed,
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions for the todo application
///
/// Serialized internally tagged on `type`, e.g.
/// `{"type":"ADD_TODO","id":0,"text":"Learn Redux"}`. Any other `type`
/// decodes to [`TodoAction::Unknown`].
///
/// `SET_VISIBLITY_FILTER` keeps its historical spelling on the wire.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TodoAction {
    /// Append a new, incomplete todo
    #[action(rename = "ADD_TODO")]
    #[serde(rename = "ADD_TODO")]
    AddTodo {
        /// Identifier for the new todo
        id: TodoId,
        /// Text of the new todo
        text: String,
    },

    /// Flip `completed` on the todo with this id
    #[action(rename = "TOGGLE_TODO")]
    #[serde(rename = "TOGGLE_TODO")]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Replace the visibility filter
    #[action(rename = "SET_VISIBLITY_FILTER")]
    #[serde(rename = "SET_VISIBLITY_FILTER")]
    SetVisibilityFilter {
        /// The new filter
        filter: VisibilityFilter,
    },

    /// Store initialization
    #[action(init)]
    #[serde(rename = "@@INIT")]
    Init,

    /// An action this application does not handle
    #[action(unknown)]
    #[serde(other, rename = "@@UNKNOWN")]
    Unknown,
}

/// Root state of the todo application
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    /// Todos in insertion order
    ///
    /// Each item is shared, so a transition that leaves an item alone keeps
    /// the same allocation in the new state.
    pub todos: Vec<Arc<Todo>>,
    /// Current filter
    pub visibility_filter: VisibilityFilter,
}

impl TodoState {
    /// Number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// First todo with `id`
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id).map(AsRef::as_ref)
    }
}
