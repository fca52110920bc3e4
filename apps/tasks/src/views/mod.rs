//! The two screens: the task list and the statistics.
//!
//! Each view is constructed from a [`TaskStore`](crate::store::TaskStore)
//! handle and owns its own subscription. Rendering first takes delivery of
//! every snapshot committed since the last render, so a view never draws a
//! stale list once an operation has returned.

use std::fmt;

/// Task list screen
pub mod list;
/// Statistics screen
pub mod stats;

pub use list::{ListRow, ListScreen, ListView};
pub use stats::{StatCard, StatsScreen, StatsView};

/// A screen that renders from the latest task snapshot
pub trait View {
    /// Rendered output
    type Screen: fmt::Display;

    /// Tab title
    fn title(&self) -> &'static str;

    /// Catch up with the store and render
    fn render(&mut self) -> Self::Screen;
}

/// Completion markers used when drawing rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Markers {
    /// `✓` and `○`
    #[default]
    Unicode,
    /// `[x]` and `[ ]`
    Ascii,
}

impl Markers {
    /// Marker for a task in the given state
    #[must_use]
    pub const fn for_completed(self, completed: bool) -> &'static str {
        match (self, completed) {
            (Self::Unicode, true) => "✓",
            (Self::Unicode, false) => "○",
            (Self::Ascii, true) => "[x]",
            (Self::Ascii, false) => "[ ]",
        }
    }
}
