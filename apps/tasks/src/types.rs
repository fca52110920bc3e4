//! Domain types for the task list.
//!
//! A task list is an ordered collection of tasks, newest first. Tasks are
//! created, toggled between active and completed, and deleted; nothing else
//! about a task ever changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task
///
/// Assigned once at creation and never reused, even after the task is
/// deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Trimmed, non-empty description
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, active task
    #[must_use]
    pub const fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Copy of this task with the completion flag inverted
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// The task collection, newest first
///
/// This is the whole state of the application; both screens are pure
/// functions of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// All tasks, newest first
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty task list
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Returns the number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates tasks in display order (newest first)
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Index of a task in display order
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Returns the number of tasks not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Inputs to the task reducer
///
/// All three are requests; whether they change anything is decided by the
/// reducer against the latest committed list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskAction {
    /// Create a task from raw user input (trimmed; blank input is ignored)
    AddTask {
        /// Text as typed
        text: String,
    },

    /// Flip a task between active and completed
    ToggleTask {
        /// Task to flip
        id: TaskId,
    },

    /// Remove a task
    DeleteTask {
        /// Task to remove
        id: TaskId,
    },
}
