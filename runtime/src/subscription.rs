//! Consumer registrations and the registry the [`Store`](crate::Store) publishes into.
//!
//! Every subscription owns an unbounded queue. Publishing pushes the new
//! snapshot into each queue synchronously, so when `Store::send` returns,
//! every live subscription already holds the snapshot it produced; the
//! consumer decides when to look at it (drain at render time with
//! [`Subscription::sync`], or `.await` [`Subscription::changed`]).

use crate::StoreError;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tasklet_core::Snapshot;
use tokio::sync::mpsc;

/// Identifier of a subscription, unique per store
pub type SubscriptionId = u64;

struct Entry<S> {
    id: SubscriptionId,
    queue: mpsc::UnboundedSender<Snapshot<S>>,
}

struct Entries<S> {
    next_id: SubscriptionId,
    live: Vec<Entry<S>>,
}

/// Set of live subscriber queues owned by a store
pub(crate) struct Registry<S> {
    entries: Mutex<Entries<S>>,
}

impl<S> Registry<S> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Mutex::new(Entries {
                next_id: 1,
                live: Vec::new(),
            }),
        }
    }

    fn register(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<Snapshot<S>>) {
        let (queue, receiver) = mpsc::unbounded_channel();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let id = entries.next_id;
        entries.next_id += 1;
        entries.live.push(Entry { id, queue });
        (id, receiver)
    }

    fn unregister(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.live.len();
        entries.live.retain(|entry| entry.id != id);
        entries.live.len() != before
    }

    /// Deliver `snapshot` to every live queue, returning how many received it
    ///
    /// Queues whose receiver is gone are pruned on the way.
    pub(crate) fn publish(&self, snapshot: &Snapshot<S>) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .live
            .retain(|entry| entry.queue.send(snapshot.clone()).is_ok());
        entries.live.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .live
            .len()
    }
}

/// A consumer's registration with a store
///
/// Created by [`Store::subscribe`](crate::Store::subscribe). It starts out
/// holding the snapshot that was current at registration time and then
/// receives every committed snapshot, in commit order. Dropping it
/// unregisters the consumer.
///
/// # Example
///
/// ```ignore
/// let mut stats = store.subscribe();
/// store.send(Action::Increment);
///
/// // Queued during `send`; pick it up when rendering
/// assert!(stats.sync());
/// assert_eq!(stats.snapshot().version(), 1);
/// ```
pub struct Subscription<S> {
    id: SubscriptionId,
    current: Snapshot<S>,
    queue: mpsc::UnboundedReceiver<Snapshot<S>>,
    registry: Weak<Registry<S>>,
}

impl<S> Subscription<S> {
    pub(crate) fn register(registry: &Arc<Registry<S>>, current: Snapshot<S>) -> Self {
        let (id, queue) = registry.register();
        Self {
            id,
            current,
            queue,
            registry: Arc::downgrade(registry),
        }
    }

    /// This subscription's identifier
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The most recent snapshot this subscription has taken delivery of
    ///
    /// Snapshots still sitting in the queue are not reflected until
    /// [`sync`](Self::sync), [`try_next`](Self::try_next) or
    /// [`changed`](Self::changed) consumes them.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot<S> {
        &self.current
    }

    /// Take the next queued snapshot, if any
    ///
    /// Yields every committed snapshot exactly once, oldest first.
    pub fn try_next(&mut self) -> Option<Snapshot<S>> {
        let next = self.queue.try_recv().ok()?;
        self.current = next.clone();
        Some(next)
    }

    /// Drain the queue so that [`snapshot`](Self::snapshot) is the newest
    /// committed snapshot
    ///
    /// Returns whether anything new arrived.
    pub fn sync(&mut self) -> bool {
        let mut advanced = false;
        while self.try_next().is_some() {
            advanced = true;
        }
        advanced
    }

    /// Wait for the next snapshot
    ///
    /// Returns immediately if one is already queued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] once the queue is empty and every
    /// handle to the store has been dropped.
    pub async fn changed(&mut self) -> Result<Snapshot<S>, StoreError> {
        let next = self.queue.recv().await.ok_or(StoreError::Closed)?;
        self.current = next.clone();
        Ok(next)
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.unregister(self.id) {
                tracing::trace!(subscription = self.id, "Unregistered subscriber");
            }
        }
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("version", &self.current.version())
            .finish_non_exhaustive()
    }
}
