//! A small to-do list with two screens over one shared store.
//!
//! Tasks live in a single [`TaskStore`]. The task list screen
//! ([`ListView`]) adds, toggles and deletes tasks; the statistics screen
//! ([`StatsView`]) shows totals and the completion rate. Both are registered
//! subscribers of the same store, so a change made through one is visible to
//! the other the next time it renders.
//!
//! # Quick Start
//!
//! ```
//! use tasklet::views::View;
//! use tasklet::{ListView, StatsView, TaskEnvironment, TaskStore};
//!
//! let store = TaskStore::new(TaskEnvironment::production());
//! let mut list = ListView::new(&store);
//! let mut stats = StatsView::new(&store);
//!
//! list.set_draft("Buy milk");
//! let _ = list.submit();
//! list.render();
//! let _ = list.tap_row(1);
//!
//! assert_eq!(stats.stats().completed, 1);
//! assert_eq!(stats.render().cards[1].subtitle, "100.0% complete");
//! ```

pub mod config;
pub mod reducer;
pub mod shell;
pub mod stats;
pub mod store;
pub mod types;
pub mod views;

pub use config::{AppConfig, ConfigError};
pub use reducer::{TaskEnvironment, TaskReducer};
pub use shell::{Command, CommandError, Outcome, Shell, Tab};
pub use stats::TaskStats;
pub use store::TaskStore;
pub use types::{Task, TaskAction, TaskId, TaskList};
pub use views::{ListView, StatsView};
