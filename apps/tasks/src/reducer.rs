//! Reducer logic for the task list.
//!
//! Every action is total: blank text and unknown ids are silently ignored
//! and reported as [`Reduction::Unchanged`], so the store neither commits nor
//! notifies for them.

use crate::types::{Task, TaskAction, TaskId, TaskList};
use std::sync::Arc;
use tasklet_core::environment::{Clock, IdGenerator, SequentialIds, SystemClock};
use tasklet_core::reducer::{Reducer, Reduction};

/// Environment dependencies for the task reducer
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and a fresh counter starting at 1
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(SequentialIds::new()))
    }
}

impl std::fmt::Debug for TaskEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Debug, Default)]
pub struct TaskReducer;

impl TaskReducer {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws ids until one is not already held by the list
    fn fresh_id(state: &TaskList, env: &TaskEnvironment) -> TaskId {
        loop {
            let id = TaskId::new(env.ids.next_id());
            if !state.contains(id) {
                return id;
            }
            tracing::warn!(%id, "Id generator returned an id already in use, drawing again");
        }
    }

    fn add_task(state: &mut TaskList, text: &str, env: &TaskEnvironment) -> Reduction {
        let text = text.trim();
        if text.is_empty() {
            return Reduction::Unchanged;
        }

        let task = Task::new(Self::fresh_id(state, env), text.to_string(), env.clock.now());
        tracing::debug!(id = %task.id, "Adding task");
        state.tasks.insert(0, task);
        Reduction::Changed
    }

    fn toggle_task(state: &mut TaskList, id: TaskId) -> Reduction {
        let Some(index) = state.position(id) else {
            return Reduction::Unchanged;
        };

        let toggled = state.tasks[index].toggled();
        tracing::debug!(%id, completed = toggled.completed, "Toggling task");
        state.tasks[index] = toggled;
        Reduction::Changed
    }

    fn delete_task(state: &mut TaskList, id: TaskId) -> Reduction {
        let Some(index) = state.position(id) else {
            return Reduction::Unchanged;
        };

        tracing::debug!(%id, "Deleting task");
        state.tasks.remove(index);
        Reduction::Changed
    }
}

impl Reducer for TaskReducer {
    type State = TaskList;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Reduction {
        match action {
            TaskAction::AddTask { text } => Self::add_task(state, &text, env),
            TaskAction::ToggleTask { id } => Self::toggle_task(state, id),
            TaskAction::DeleteTask { id } => Self::delete_task(state, id),
        }
    }
}
