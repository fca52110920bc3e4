//! # Tasklet Runtime
//!
//! Runtime implementation for the Tasklet architecture.
//!
//! This crate provides the [`Store`] that owns state, runs the reducer and
//! keeps every registered consumer in step with the latest committed
//! snapshot.
//!
//! ## Core Components
//!
//! - **Store**: Owns the current [`Snapshot`](tasklet_core::Snapshot), serializes writers
//! - **Subscription**: A consumer's registration; receives every committed snapshot
//! - **Fan-out**: Delivery to all live subscriptions happens inside `send`, before it returns
//!
//! ## Example
//!
//! ```ignore
//! use tasklet_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//! let mut view = store.subscribe();
//!
//! // Send an action
//! store.send(Action::DoSomething);
//!
//! // The subscription already holds the new snapshot
//! assert!(view.sync());
//! let value = view.snapshot().some_field;
//! ```

/// Store runtime (commit + fan-out)
pub mod store;

/// Consumer registrations
pub mod subscription;

pub use error::StoreError;
pub use store::Store;
pub use subscription::Subscription;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur while observing a Store
    ///
    /// Store operations themselves are total; only waiting for future
    /// snapshots can fail.
    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StoreError {
        /// Every handle to the store was dropped
        ///
        /// Returned by [`Subscription::changed`](crate::Subscription::changed)
        /// once all queued snapshots have been consumed and no further
        /// snapshot can ever be committed.
        #[error("Store closed: no further snapshots will be published")]
        Closed,
    }
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklet_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_label("tasks")
///     .with_subscriber_warn_threshold(4);
/// assert_eq!(config.label, "tasks");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name used in tracing spans for this store
    pub label: String,
    /// Live subscriber count above which a warning is logged
    ///
    /// A steadily growing subscriber count usually means some consumer keeps
    /// subscribing without dropping its previous subscription.
    pub subscriber_warn_threshold: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(label: impl Into<String>, subscriber_warn_threshold: usize) -> Self {
        Self {
            label: label.into(),
            subscriber_warn_threshold,
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the subscriber warning threshold
    #[must_use]
    pub const fn with_subscriber_warn_threshold(mut self, threshold: usize) -> Self {
        self.subscriber_warn_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: "store".to_string(),
            subscriber_warn_threshold: 16,
        }
    }
}
