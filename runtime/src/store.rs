//! The Store - runtime coordinator for a reducer.

use crate::StoreConfig;
use crate::subscription::{Registry, Subscription};
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tasklet_core::Snapshot;
use tasklet_core::reducer::{Reducer, Reduction};

struct Inner<S, E, R> {
    current: RwLock<Snapshot<S>>,
    reducer: R,
    environment: E,
    subscribers: Arc<Registry<S>>,
    config: StoreConfig,
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. The current snapshot (replaced, never mutated in place)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Subscriber fan-out
///
/// Handles are cheap to clone and all refer to the same state. Writers are
/// serialized: each [`send`](Self::send) reduces against the latest committed
/// snapshot, and its snapshot is delivered to every subscription before the
/// next writer can commit.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(CounterState::default(), CounterReducer, ());
/// let mut view = store.subscribe();
///
/// store.send(CounterAction::Increment);
/// view.sync();
/// assert_eq!(view.snapshot().count, 1);
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    inner: Arc<Inner<S, E, R>>,
    _action: PhantomData<fn(A)>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _action: PhantomData,
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`StoreConfig::default`].
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with a custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(Snapshot::initial(initial_state)),
                reducer,
                environment,
                subscribers: Arc::new(Registry::new()),
                config,
            }),
            _action: PhantomData,
        }
    }

    /// Send an action to the store
    ///
    /// Runs the reducer against a private copy of the latest snapshot. If the
    /// reducer reports [`Reduction::Changed`], the copy becomes the next
    /// snapshot and is queued on every live subscription before this method
    /// returns. On [`Reduction::Unchanged`] nothing is committed and nobody
    /// is notified.
    pub fn send(&self, action: A) -> Reduction {
        let span = tracing::debug_span!("store_send", store = %self.inner.config.label);
        let _enter = span.enter();

        metrics::counter!("store.actions.total").increment(1);

        // A reducer panic can only poison the lock before `current` is
        // replaced, so the guarded snapshot is always a committed one.
        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut working = S::clone(&current);
        let start = Instant::now();
        let reduction = self
            .inner
            .reducer
            .reduce(&mut working, action, &self.inner.environment);
        metrics::histogram!("store.reducer.duration_seconds")
            .record(start.elapsed().as_secs_f64());

        if !reduction.is_changed() {
            metrics::counter!("store.actions.unchanged").increment(1);
            tracing::trace!(version = current.version(), "Action left state unchanged");
            return reduction;
        }

        let next = current.succeed(working);
        *current = next.clone();
        let delivered = self.inner.subscribers.publish(&next);
        drop(current);

        metrics::counter!("store.snapshots.committed").increment(1);
        tracing::debug!(version = next.version(), delivered, "Committed snapshot");

        reduction
    }

    /// Register a consumer
    ///
    /// The returned subscription already holds the current snapshot and will
    /// receive every snapshot committed from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<S> {
        // Holding the read lock keeps commits out until the queue exists.
        let current = self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let subscription = Subscription::register(&self.inner.subscribers, current.clone());
        let version = current.version();
        drop(current);

        let live = self.inner.subscribers.len();
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("store.subscribers").set(live as f64);
        tracing::debug!(subscription = subscription.id(), version, live, "Registered subscriber");

        if live > self.inner.config.subscriber_warn_threshold {
            tracing::warn!(
                store = %self.inner.config.label,
                live,
                threshold = self.inner.config.subscriber_warn_threshold,
                "Subscriber count above threshold, check for leaked subscriptions"
            );
        }

        subscription
    }

    /// The latest committed snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<S> {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let count = store.state(|s| s.items.len());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let current = self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(current.state())
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// This store's configuration
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Borrow the injected environment
    #[must_use]
    pub fn environment(&self) -> &E {
        &self.inner.environment
    }
}
