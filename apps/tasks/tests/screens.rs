//! End-to-end behavior of the two screens over one store.

#![allow(clippy::unwrap_used, clippy::panic)] // Test code can unwrap and panic

use std::sync::Arc;
use tasklet::views::View;
use tasklet::{ListView, StatsView, TaskEnvironment, TaskStore};
use tasklet_core::environment::SequentialIds;
use tasklet_core::reducer::Reduction;
use tasklet_testing::test_clock;

fn store() -> TaskStore {
    TaskStore::new(TaskEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIds::new()),
    ))
}

#[test]
fn add_toggle_delete_walkthrough() {
    let store = store();
    let mut list = ListView::new(&store);
    let mut stats = StatsView::new(&store);

    list.set_draft("A");
    assert_eq!(list.submit(), Reduction::Changed);
    list.set_draft("B");
    assert_eq!(list.submit(), Reduction::Changed);

    let screen = list.render();
    let texts: Vec<&str> = screen.rows.iter().map(|row| row.text.as_str()).collect();
    assert_eq!(texts, vec!["B", "A"]);
    assert_eq!(screen.subtitle(), "2 active, 0 completed");

    // Toggle B
    assert_eq!(list.tap_row(1), Some(Reduction::Changed));
    let numbers = stats.render();
    assert_eq!(numbers.stats.total, 2);
    assert_eq!(numbers.stats.completed, 1);
    assert_eq!(numbers.stats.active, 1);
    assert_eq!(numbers.cards[1].subtitle, "50.0% complete");

    // Delete A
    assert_eq!(list.tap_delete(2), Some(Reduction::Changed));
    let screen = list.render();
    assert_eq!(screen.rows.len(), 1);
    assert_eq!(screen.rows[0].text, "B");
    assert!(screen.rows[0].completed);
    assert_eq!(screen.subtitle(), "0 active, 1 completed");

    let numbers = stats.render();
    assert_eq!(numbers.stats.total, 1);
    assert_eq!(numbers.cards[1].subtitle, "100.0% complete");
}

#[test]
fn both_views_see_the_same_version() {
    let store = store();
    let mut list = ListView::new(&store);
    let mut stats = StatsView::new(&store);

    list.set_draft("write report");
    let _ = list.submit();
    list.render();
    let _ = list.tap_row(1);

    let list_screen = list.render();
    let stats_screen = stats.render();

    assert_eq!(list_screen.version, 2);
    assert_eq!(stats_screen.version, list_screen.version);
    assert_eq!(stats_screen.stats.completed, list_screen.completed);
    assert_eq!(stats_screen.stats.active, list_screen.active);
}

#[test]
fn view_created_late_starts_at_current_state() {
    let store = store();
    let _ = store.add_task("early");
    let _ = store.add_task("later");

    let mut stats = StatsView::new(&store);
    let screen = stats.render();

    assert_eq!(screen.version, 2);
    assert_eq!(screen.stats.total, 2);
}

#[test]
fn dropping_a_view_unregisters_it() {
    let store = store();
    let list = ListView::new(&store);
    let stats = StatsView::new(&store);
    assert_eq!(store.subscriber_count(), 2);

    drop(stats);
    assert_eq!(store.subscriber_count(), 1);

    drop(list);
    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(store.add_task("nobody watching"), Reduction::Changed);
}

#[test]
fn stale_row_tap_is_harmless() {
    let store = store();
    let mut list = ListView::new(&store);
    let _ = store.add_task("doomed");
    list.render();

    let id = store.snapshot().tasks[0].id;
    let _ = store.delete_task(id);

    // Row 1 still names the deleted task until the next render
    assert_eq!(list.tap_row(1), Some(Reduction::Unchanged));
    assert_eq!(list.tap_delete(1), Some(Reduction::Unchanged));
    assert!(list.render().rows.is_empty());
}
