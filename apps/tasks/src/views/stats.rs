use super::View;
use crate::stats::TaskStats;
use crate::store::TaskStore;
use crate::types::TaskList;
use std::fmt;
use tasklet_runtime::Subscription;

/// One figure on the statistics screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    /// Card heading
    pub title: &'static str,
    /// The figure
    pub value: String,
    /// Caption under the heading
    pub subtitle: String,
}

/// Rendered statistics
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsScreen {
    /// Version of the snapshot this screen was drawn from
    pub version: u64,
    /// The derived counts
    pub stats: TaskStats,
    /// Total, completed, active, in that order
    pub cards: Vec<StatCard>,
}

impl StatsScreen {
    fn from_stats(version: u64, stats: TaskStats) -> Self {
        let cards = vec![
            StatCard {
                title: "Total Tasks",
                value: stats.total.to_string(),
                subtitle: "All time tasks".to_string(),
            },
            StatCard {
                title: "Completed",
                value: stats.completed.to_string(),
                subtitle: format!("{}% complete", stats.completion_rate_label()),
            },
            StatCard {
                title: "Active",
                value: stats.active.to_string(),
                subtitle: "Tasks remaining".to_string(),
            },
        ];
        Self {
            version,
            stats,
            cards,
        }
    }
}

impl fmt::Display for StatsScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics")?;
        writeln!(f, "Your productivity at a glance")?;
        for card in &self.cards {
            write!(f, "\n  {:<12}{:>5}   {}", card.title, card.value, card.subtitle)?;
        }
        Ok(())
    }
}

/// The statistics screen
///
/// Read-only: it has no way to change the task list.
pub struct StatsView {
    tasks: Subscription<TaskList>,
}

impl StatsView {
    /// Create the view and register it with `store`
    #[must_use]
    pub fn new(store: &TaskStore) -> Self {
        Self {
            tasks: store.subscribe(),
        }
    }

    /// Catch up with the store and derive the counts
    pub fn stats(&mut self) -> TaskStats {
        self.tasks.sync();
        TaskStats::from_tasks(self.tasks.snapshot())
    }
}

impl View for StatsView {
    type Screen = StatsScreen;

    fn title(&self) -> &'static str {
        "Stats"
    }

    fn render(&mut self) -> StatsScreen {
        let stats = self.stats();
        StatsScreen::from_stats(self.tasks.snapshot().version(), stats)
    }
}

impl fmt::Debug for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsView")
            .field("subscription", &self.tasks)
            .finish()
    }
}
