//! # Tasklet Testing
//!
//! Testing utilities and helpers for the Tasklet architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for reductions
//!
//! ## Example
//!
//! ```ignore
//! use tasklet_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(TaskReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TaskList::new())
//!     .when_action(TaskAction::AddTask { text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.len(), 1))
//!     .then_reduction(assertions::assert_changed)
//!     .run();
//! ```

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use tasklet_core::environment::Clock;

/// Given-When-Then reducer harness
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Duration, Mutex, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklet_testing::mocks::FixedClock;
    /// use tasklet_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// Useful when a test needs distinct, ordered timestamps without sleeping.
    ///
    /// ```
    /// use tasklet_testing::mocks::SteppingClock;
    /// use tasklet_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let clock = SteppingClock::new(Utc::now(), Duration::milliseconds(1));
    /// assert!(clock.now() < clock.now());
    /// ```
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Start at `start`, advancing by `step` after each reading
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self
                .next
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SteppingClock, test_clock};
