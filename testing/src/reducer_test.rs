//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use tasklet_core::reducer::{Reducer, Reduction};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for reduction assertion functions
type ReductionAssertion = Box<dyn FnOnce(Reduction)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Actions given with [`when_action`](Self::when_action) run in order; state
/// assertions see the state after the last one, reduction assertions see the
/// last action's [`Reduction`].
///
/// # Example
///
/// ```ignore
/// use tasklet_testing::ReducerTest;
///
/// ReducerTest::new(CounterReducer)
///     .with_env(())
///     .given_state(CounterState { count: 0 })
///     .when_action(CounterAction::Increment)
///     .then_state(|state| {
///         assert_eq!(state.count, 1);
///     })
///     .then_reduction(assertions::assert_changed)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    reduction_assertions: Vec<ReductionAssertion>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            reduction_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to run (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the last action's reduction (Then)
    #[must_use]
    pub fn then_reduction<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(Reduction) + 'static,
    {
        self.reduction_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut last = Reduction::Unchanged;
        for action in self.actions {
            last = self.reducer.reduce(&mut state, action, &env);
        }

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run reduction assertions
        for assertion in self.reduction_assertions {
            assertion(last);
        }
    }
}

/// Helper assertions for reductions
pub mod assertions {
    use tasklet_core::reducer::Reduction;

    /// Assert that the action changed the state
    ///
    /// # Panics
    ///
    /// Panics if the reduction is `Unchanged`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_changed(reduction: Reduction) {
        assert_eq!(
            reduction,
            Reduction::Changed,
            "Expected the action to change state"
        );
    }

    /// Assert that the action was a no-op
    ///
    /// # Panics
    ///
    /// Panics if the reduction is `Changed`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_unchanged(reduction: Reduction) {
        assert_eq!(
            reduction,
            Reduction::Unchanged,
            "Expected the action to leave state unchanged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        Clamp,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Reduction {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    Reduction::Changed
                }
                TestAction::Decrement => {
                    state.count -= 1;
                    Reduction::Changed
                }
                TestAction::Clamp if state.count >= 0 => Reduction::Unchanged,
                TestAction::Clamp => {
                    state.count = 0;
                    Reduction::Changed
                }
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_reduction(assertions::assert_changed)
            .run();
    }

    #[test]
    fn test_reducer_test_sequence() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Clamp)
            .then_state(|state| {
                assert_eq!(state.count, 4);
            })
            .then_reduction(assertions::assert_unchanged)
            .run();
    }

    #[test]
    #[should_panic(expected = "At least one action")]
    fn test_reducer_test_requires_action() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .run();
    }
}
