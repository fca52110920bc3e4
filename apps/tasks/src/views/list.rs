use super::{Markers, View};
use crate::store::TaskStore;
use crate::types::{TaskId, TaskList};
use std::fmt;
use tasklet_core::reducer::Reduction;
use tasklet_runtime::Subscription;

const TITLE: &str = "My Tasks";
const PLACEHOLDER: &str = "Add a new task...";
const EMPTY: &str = "No tasks yet. Add one below.";

/// One task as drawn on the list screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    /// 1-based position on screen
    pub row: usize,
    /// Task behind the row
    pub id: TaskId,
    /// Task text
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
}

/// Rendered task list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListScreen {
    /// Version of the snapshot this screen was drawn from
    pub version: u64,
    /// Open tasks, for the header
    pub active: usize,
    /// Done tasks, for the header
    pub completed: usize,
    /// Rows in display order
    pub rows: Vec<ListRow>,
    /// Pending input
    pub draft: String,
    /// Marker style
    pub markers: Markers,
}

impl ListScreen {
    /// Header line under the title
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("{} active, {} completed", self.active, self.completed)
    }
}

impl fmt::Display for ListScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{}", self.subtitle())?;
        writeln!(f)?;
        if self.rows.is_empty() {
            writeln!(f, "  {EMPTY}")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "{:>3}. {} {}",
                row.row,
                self.markers.for_completed(row.completed),
                row.text
            )?;
        }
        writeln!(f)?;
        if self.draft.is_empty() {
            write!(f, "> {PLACEHOLDER}")
        } else {
            write!(f, "> {}", self.draft)
        }
    }
}

/// The task list screen
///
/// Holds the input draft and remembers which task sat on which row the last
/// time it was rendered, so row taps resolve against what the user saw.
pub struct ListView {
    store: TaskStore,
    tasks: Subscription<TaskList>,
    draft: String,
    rows: Vec<TaskId>,
    markers: Markers,
}

impl ListView {
    /// Create the view and register it with `store`
    #[must_use]
    pub fn new(store: &TaskStore) -> Self {
        let tasks = store.subscribe();
        let rows = tasks.snapshot().iter().map(|task| task.id).collect();
        Self {
            store: store.clone(),
            tasks,
            draft: String::new(),
            rows,
            markers: Markers::default(),
        }
    }

    /// Use a different marker style
    #[must_use]
    pub const fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Current input text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the input
    ///
    /// A non-blank draft becomes a new task and the input is cleared. A blank
    /// draft is left as it is and the store is not called.
    pub fn submit(&mut self) -> Reduction {
        if self.draft.trim().is_empty() {
            return Reduction::Unchanged;
        }
        let reduction = self.store.add_task(&self.draft);
        self.draft.clear();
        reduction
    }

    /// Task shown on `row` (1-based) at the last render
    #[must_use]
    pub fn task_at(&self, row: usize) -> Option<TaskId> {
        row.checked_sub(1).and_then(|index| self.rows.get(index)).copied()
    }

    /// Tap the body of the task on `row`, toggling it
    ///
    /// `None` if no task was drawn on that row.
    pub fn tap_row(&mut self, row: usize) -> Option<Reduction> {
        let id = self.task_at(row)?;
        Some(self.store.toggle_task(id))
    }

    /// Tap the delete affordance of the task on `row`
    ///
    /// `None` if no task was drawn on that row.
    pub fn tap_delete(&mut self, row: usize) -> Option<Reduction> {
        let id = self.task_at(row)?;
        Some(self.store.delete_task(id))
    }
}

impl View for ListView {
    type Screen = ListScreen;

    fn title(&self) -> &'static str {
        "Tasks"
    }

    fn render(&mut self) -> ListScreen {
        self.tasks.sync();
        let snapshot = self.tasks.snapshot();

        let rows: Vec<ListRow> = snapshot
            .iter()
            .enumerate()
            .map(|(index, task)| ListRow {
                row: index + 1,
                id: task.id,
                text: task.text.clone(),
                completed: task.completed,
            })
            .collect();
        self.rows = rows.iter().map(|row| row.id).collect();

        ListScreen {
            version: snapshot.version(),
            active: snapshot.active_count(),
            completed: snapshot.completed_count(),
            rows,
            draft: self.draft.clone(),
            markers: self.markers,
        }
    }
}

impl fmt::Debug for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("subscription", &self.tasks)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::TaskEnvironment;
    use std::sync::Arc;
    use tasklet_core::environment::SequentialIds;
    use tasklet_testing::test_clock;

    fn store() -> TaskStore {
        TaskStore::new(TaskEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIds::new()),
        ))
    }

    #[test]
    fn submit_adds_and_clears_draft() {
        let store = store();
        let mut view = ListView::new(&store);

        view.set_draft("  Buy milk  ");
        assert!(view.submit().is_changed());

        assert_eq!(view.draft(), "");
        let screen = view.render();
        assert_eq!(screen.rows.len(), 1);
        assert_eq!(screen.rows[0].text, "Buy milk");
    }

    #[test]
    fn blank_submit_keeps_draft_and_skips_store() {
        let store = store();
        let mut view = ListView::new(&store);

        view.set_draft("   ");
        assert_eq!(view.submit(), Reduction::Unchanged);

        assert_eq!(view.draft(), "   ");
        assert_eq!(store.snapshot().version(), 0);
    }

    #[test]
    fn rows_resolve_against_last_render() {
        let store = store();
        let mut view = ListView::new(&store);
        let _ = store.add_task("A");
        let _ = store.add_task("B");

        // Not rendered yet: no rows on screen
        assert_eq!(view.tap_row(1), None);

        let screen = view.render();
        assert_eq!(screen.subtitle(), "2 active, 0 completed");
        assert_eq!(view.tap_row(1), Some(Reduction::Changed));
        assert_eq!(view.tap_row(3), None);
        assert_eq!(view.tap_delete(0), None);

        let screen = view.render();
        assert!(screen.rows[0].completed);
        assert_eq!(screen.subtitle(), "1 active, 1 completed");
    }

    #[test]
    fn display_shows_placeholder_and_empty_state() {
        let store = store();
        let mut view = ListView::new(&store).with_markers(Markers::Ascii);

        let text = view.render().to_string();
        assert!(text.starts_with("My Tasks\n0 active, 0 completed\n"));
        assert!(text.contains(EMPTY));
        assert!(text.ends_with("> Add a new task..."));

        let _ = store.add_task("Walk dog");
        // Row 1 was not on screen yet, so the tap lands nowhere
        assert_eq!(view.tap_row(1), None);
        let text = view.render().to_string();
        assert!(text.contains("  1. [ ] Walk dog"));
    }
}
