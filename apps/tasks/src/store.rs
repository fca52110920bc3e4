//! The shared task store handle.
//!
//! [`TaskStore`] is what every screen is constructed from. It is a cheap,
//! cloneable handle over one runtime [`Store`]; all clones see the same
//! tasks and feed the same subscribers.

use crate::reducer::{TaskEnvironment, TaskReducer};
use crate::types::{TaskAction, TaskId, TaskList};
use tasklet_core::Snapshot;
use tasklet_core::reducer::Reduction;
use tasklet_runtime::{Store, StoreConfig, Subscription};

type Inner = Store<TaskList, TaskAction, TaskEnvironment, TaskReducer>;

/// Shared handle to the task list
#[derive(Clone)]
pub struct TaskStore {
    store: Inner,
}

impl TaskStore {
    /// Empty store with the given environment
    #[must_use]
    pub fn new(environment: TaskEnvironment) -> Self {
        Self::with_config(environment, StoreConfig::default().with_label("tasks"))
    }

    /// Empty store with a custom runtime configuration
    #[must_use]
    pub fn with_config(environment: TaskEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(TaskList::new(), TaskReducer::new(), environment, config),
        }
    }

    /// Add a task from raw input
    ///
    /// Blank input is ignored.
    pub fn add_task(&self, text: &str) -> Reduction {
        self.store.send(TaskAction::AddTask {
            text: text.to_string(),
        })
    }

    /// Flip a task between active and completed
    ///
    /// Unknown ids are ignored.
    pub fn toggle_task(&self, id: TaskId) -> Reduction {
        self.store.send(TaskAction::ToggleTask { id })
    }

    /// Remove a task
    ///
    /// Unknown ids are ignored.
    pub fn delete_task(&self, id: TaskId) -> Reduction {
        self.store.send(TaskAction::DeleteTask { id })
    }

    /// Send any task action
    pub fn send(&self, action: TaskAction) -> Reduction {
        self.store.send(action)
    }

    /// Register a consumer of task list snapshots
    #[must_use]
    pub fn subscribe(&self) -> Subscription<TaskList> {
        self.store.subscribe()
    }

    /// The latest committed task list
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<TaskList> {
        self.store.snapshot()
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("version", &self.snapshot().version())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
