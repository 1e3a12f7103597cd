//! Synchronous state listeners.
//!
//! A [`Store`](crate::Store) keeps a registry of listeners that are called,
//! in registration order, right after a reducer call has changed state.
//! Registering returns a [`Subscription`]; cancelling it (explicitly or by
//! dropping it) removes the listener, and a cancelled listener is never
//! invoked again.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Listener callback stored in the registry
type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Entry<S> {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener<S>,
}

/// Registry of state listeners owned by a store
pub(crate) struct ListenerRegistry<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry<S>>>,
}

impl<S> ListenerRegistry<S> {
    pub(crate) const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Number of live listeners
    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Call every active listener with the new state
    ///
    /// The entry list is snapshotted first so a listener may cancel its own
    /// (or another) subscription without deadlocking.
    pub(crate) fn notify(&self, state: &S) {
        let snapshot: Vec<(Arc<AtomicBool>, Listener<S>)> = {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries
                .iter()
                .map(|e| (Arc::clone(&e.active), Arc::clone(&e.listener)))
                .collect()
        };

        for (active, listener) in snapshot {
            if active.load(Ordering::Acquire) {
                listener(state);
            }
        }
    }
}

impl<S> ListenerRegistry<S>
where
    S: 'static,
{
    /// Register a listener and hand back its cancellation handle
    pub(crate) fn register<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        S: Send,
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Entry {
                id,
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            });

        tracing::trace!(subscription_id = id, "Listener registered");

        let registry: Arc<dyn Unregister> = Arc::clone(self) as Arc<dyn Unregister>;
        Subscription {
            id,
            active,
            registry: Arc::downgrade(&registry),
        }
    }
}

/// Type-erased removal hook so `Subscription` is not generic over state
trait Unregister: Send + Sync {
    fn unregister(&self, id: u64);
}

impl<S> Unregister for ListenerRegistry<S>
where
    S: 'static,
{
    fn unregister(&self, id: u64) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|e| e.id != id);
        tracing::trace!(subscription_id = id, "Listener removed");
    }
}

/// Handle to a registered listener
///
/// Dropping the handle cancels the subscription. Call [`Subscription::detach`]
/// to keep the listener registered for the lifetime of the store instead.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    registry: Weak<dyn Unregister>,
}

impl Subscription {
    /// Cancel the subscription
    ///
    /// Once this returns, the listener will not be invoked again.
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns `true` while the listener is still registered
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Keep the listener registered for as long as the store lives
    pub fn detach(self) {
        std::mem::forget(self);
    }

    fn release(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            if let Some(registry) = self.registry.upgrade() {
                registry.unregister(self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
