//! Aggregate counts derived from a task list.

use crate::types::TaskList;
use serde::Serialize;

/// Totals shown on the statistics screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Number of tasks
    pub total: usize,
    /// Number of completed tasks
    pub completed: usize,
    /// Number of tasks still open
    pub active: usize,
}

impl TaskStats {
    /// Derive the statistics for `tasks`
    #[must_use]
    pub fn from_tasks(tasks: &TaskList) -> Self {
        let total = tasks.len();
        let completed = tasks.completed_count();
        Self {
            total,
            completed,
            active: total - completed,
        }
    }

    /// Percentage of tasks completed, rounded to one decimal place
    ///
    /// `0.0` for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rate = self.completed as f64 / self.total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    /// [`completion_rate`](Self::completion_rate) formatted with one decimal
    #[must_use]
    pub fn completion_rate_label(&self) -> String {
        format!("{:.1}", self.completion_rate())
    }
}
