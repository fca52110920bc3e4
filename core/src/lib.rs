//! # Tasklet Core
//!
//! Core traits and types for the Tasklet architecture.
//!
//! This crate provides the fundamental abstractions for keeping several
//! independently rendered views consistent with one piece of owned state.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, owned by a store
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → Reduction`
//! - **Reduction**: Whether the action changed the state (and must be published)
//! - **Snapshot**: Immutable, versioned view of state handed to consumers
//! - **Environment**: Injected dependencies (clock, id generation)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Single writer, many readers
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use tasklet_core::reducer::{Reducer, Reduction};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: u32,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> Reduction {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 Reduction::Changed
//!             }
//!             CounterAction::Reset if state.count == 0 => Reduction::Unchanged,
//!             CounterAction::Reset => {
//!                 state.count = 0;
//!                 Reduction::Changed
//!             }
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! assert!(CounterReducer.reduce(&mut state, CounterAction::Increment, &()).is_changed());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Immutable, versioned state snapshots
pub mod snapshot;

pub use snapshot::Snapshot;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Reduction`
///
/// They contain all business logic and are deterministic and testable.
/// The reducer never notifies anyone: it only reports whether the state
/// changed, and the runtime decides what to publish.
pub mod reducer {
    /// Outcome of reducing a single action
    ///
    /// An action either changed the state, in which case the runtime commits a
    /// new snapshot and notifies subscribers, or it was a no-op (empty input,
    /// unknown id, ...), in which case nothing is committed and nobody is
    /// notified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[must_use]
    pub enum Reduction {
        /// The state was modified
        Changed,
        /// The action was a no-op; the state is untouched
        Unchanged,
    }

    impl Reduction {
        /// Whether the state was modified
        #[must_use]
        pub const fn is_changed(self) -> bool {
            matches!(self, Self::Changed)
        }

        /// Returns `Changed` when `changed` is true, `Unchanged` otherwise
        pub const fn from_changed(changed: bool) -> Self {
            if changed {
                Self::Changed
            } else {
                Self::Unchanged
            }
        }
    }

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Contract
    ///
    /// When `reduce` returns [`Reduction::Unchanged`] it must not have
    /// modified `state`. The runtime reduces into a private copy, so a
    /// violation never leaks to readers, but the copy is discarded.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into a state change
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to the working copy of state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Whether the state changed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Reduction;
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism a reducer needs (time, fresh identifiers)
/// are abstracted behind traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklet_core::environment::{Clock, SystemClock};
    ///
    /// let before = chrono::Utc::now();
    /// assert!(SystemClock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh numeric identifiers
    ///
    /// Implementations must never hand out the same value twice over their
    /// lifetime.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> u64;
    }

    /// Monotonic counter starting at 1
    ///
    /// ```
    /// use tasklet_core::environment::{IdGenerator, SequentialIds};
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), 1);
    /// assert_eq!(ids.next_id(), 2);
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        last: AtomicU64,
    }

    impl SequentialIds {
        /// Counter whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// Counter whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                last: AtomicU64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> u64 {
            self.last.fetch_add(1, Ordering::Relaxed) + 1
        }
    }
}
