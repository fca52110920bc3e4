//! Immutable, versioned views of store state.
//!
//! A [`Snapshot`] is what consumers see. It wraps the state in an [`Arc`], so
//! handing the same snapshot to any number of readers is a reference count
//! bump, and it offers no way to reach the state mutably: the only way to get
//! a different state is for the owning store to commit a new snapshot.
//!
//! Versions start at 0 for the initial state and increase by exactly one per
//! committed change, which lets consumers (and tests) tell whether two views
//! were rendered from the same state.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable state at one point in time
pub struct Snapshot<S> {
    version: u64,
    state: Arc<S>,
}

impl<S> Snapshot<S> {
    /// Wrap the initial state as version 0
    #[must_use]
    pub fn initial(state: S) -> Self {
        Self {
            version: 0,
            state: Arc::new(state),
        }
    }

    /// The snapshot that follows this one
    #[must_use]
    pub fn succeed(&self, state: S) -> Self {
        Self {
            version: self.version + 1,
            state: Arc::new(state),
        }
    }

    /// Number of changes committed before this snapshot
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Borrow the state
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Whether both snapshots share the same underlying state allocation
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> Deref for Snapshot<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.state
    }
}

impl<S: fmt::Debug> fmt::Debug for Snapshot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.version)
            .field("state", &*self.state)
            .finish()
    }
}

impl<S: Serialize> Serialize for Snapshot<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let mut out = serializer.serialize_struct("Snapshot", 2)?;
        out.serialize_field("version", &self.version)?;
        out.serialize_field("state", &*self.state)?;
        out.end()
    }
}
