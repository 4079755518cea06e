//! Thread-safe listener registry.
//!
//! Listeners can be added and removed from any thread at any time. `notify`
//! iterates over a snapshot of the registry taken under a short read lock,
//! so a listener that removes itself (or adds another) during delivery never
//! deadlocks; it just takes effect for the next event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::types::PublishEvent;

/// Handle returned by [`PublishListeners::add`]; pass it back to
/// [`PublishListeners::remove`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&PublishEvent) + Send + Sync>;

/// Registry of publish-event listeners.
pub struct PublishListeners {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
}

impl PublishListeners {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a listener. The callback runs on the notifying task and
    /// must not block.
    pub fn add(&self, listener: impl Fn(&PublishEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = match self.listeners.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Unknown IDs are ignored.
    pub fn remove(&self, id: ListenerId) {
        let mut listeners = match self.listeners.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Delivers an event to every currently registered listener.
    pub fn notify(&self, event: &PublishEvent) {
        let snapshot: Vec<Listener> = {
            let listeners = match self.listeners.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        match self.listeners.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PublishListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PublishListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishListeners")
            .field("listeners", &self.len())
            .finish()
    }
}
