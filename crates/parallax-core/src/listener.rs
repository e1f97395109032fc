//! Typed publish/subscribe registries for view events
//!
//! One registry per event source (search results, selection snapshots,
//! history transitions) instead of ambient global listener state. Callbacks
//! run on the caller's thread; a panicking callback is logged and the
//! remaining callbacks still receive the notification.

use std::panic::{catch_unwind, AssertUnwindSafe};

/// Handle returned by [`Listeners::subscribe`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A registry of callbacks for one event type.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Listeners {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a callback. The returned id unsubscribes it later.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Removing an id that was never registered (or was
    /// already removed) is a logged no-op.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() == before {
            tracing::warn!(?id, "removing unregistered listener");
        }
    }

    /// Deliver `event` to every registered callback. A callback that panics
    /// is logged and skipped; later callbacks still fire, so one faulty
    /// observer cannot corrupt an in-progress transition.
    pub fn notify(&mut self, event: &E) {
        for (id, callback) in &mut self.entries {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(event))) {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!(?id, %message, "listener panicked during notification");
            }
        }
    }

    /// Drop all registered callbacks.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}
