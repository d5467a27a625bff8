//! Listener registry and unsubscribe handles.
//!
//! Listeners are kept in registration order. Every subscription gets its own
//! [`ListenerId`], so registering the same callback twice yields two entries
//! that are removed independently.

use smallvec::SmallVec;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// A store listener. Called with no arguments after every dispatch.
pub type Listener = dyn Fn() + Send + Sync;

/// Listener snapshot taken at the start of a notification round.
///
/// Most stores have a handful of listeners, so small rounds stay on the stack.
pub(crate) type ListenerSnapshot = SmallVec<[Arc<Listener>; 8]>;

/// Identifies one subscription within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Ordered listener list of one store
pub(crate) struct ListenerRegistry {
    store: String,
    next_id: u64,
    entries: Vec<(ListenerId, Arc<Listener>)>,
}

impl ListenerRegistry {
    pub(crate) const fn new(store: String) -> Self {
        Self {
            store,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, listener: Arc<Listener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        self.record_size();
        id
    }

    /// Removes the entry with `id`; false if it was already gone
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.record_size();
        }
        removed
    }

    pub(crate) fn snapshot(&self) -> ListenerSnapshot {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn record_size(&self) {
        // Listener counts stay far below 2^52
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("store_listeners", "store" => self.store.clone())
            .set(self.entries.len() as f64);
    }
}

/// Handle returned by `Store::subscribe`.
///
/// Calling [`Unsubscribe::unsubscribe`] removes exactly the registration that
/// produced this handle. Further calls do nothing. Dropping the handle does
/// *not* unsubscribe: a listener stays registered for the life of the store
/// unless removed explicitly.
///
/// A listener removed while a notification round is in progress is still
/// called in that round, because the round iterates a snapshot.
#[derive(Clone)]
pub struct Unsubscribe {
    registry: Weak<Mutex<ListenerRegistry>>,
    id: ListenerId,
}

impl Unsubscribe {
    pub(crate) fn new(registry: &Arc<Mutex<ListenerRegistry>>, id: ListenerId) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            id,
        }
    }

    /// The subscription this handle controls
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener.
    ///
    /// Returns `true` the first time, `false` on every later call (or when
    /// the store is gone).
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };

        let removed = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.id);

        if removed {
            tracing::trace!(listener = %self.id, "Listener unsubscribed");
        }

        removed
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}
