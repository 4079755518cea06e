//! Administrative feed locking.
//!
//! A locked feed is never published, no matter how long its changes have
//! been pending; the scheduler asks the oracle once per tick. Locking is an
//! administrative action (e.g. the user is composing a large edit and wants
//! no intermediate state published), not a data lock.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::data::FeedId;
use crate::events::{PublishEvent, PublishListeners};

/// Tells the scheduler whether a feed is administratively locked.
/// Implementations must be side-effect-free and cheap; this is called every
/// tick.
pub trait LockOracle: Send + Sync {
    fn is_locked(&self, feed_id: &FeedId) -> bool;
}

/// In-process lock registry.
///
/// Optionally wired to a listener registry so lock transitions are visible
/// to the rest of the application.
pub struct LockRegistry {
    locked: RwLock<HashSet<FeedId>>,
    listeners: Option<Arc<PublishListeners>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            locked: RwLock::new(HashSet::new()),
            listeners: None,
        }
    }

    /// Builds a registry that announces lock transitions as
    /// [`PublishEvent::FeedLocked`] / [`PublishEvent::FeedUnlocked`].
    pub fn with_listeners(listeners: Arc<PublishListeners>) -> Self {
        Self {
            locked: RwLock::new(HashSet::new()),
            listeners: Some(listeners),
        }
    }

    /// Locks a feed. Locking an already locked feed is a no-op and fires no
    /// event.
    pub fn lock(&self, feed_id: &FeedId) {
        let newly_locked = {
            let mut locked = match self.locked.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            locked.insert(feed_id.clone())
        };
        if newly_locked {
            tracing::debug!(feed = %feed_id, "feed locked");
            if let Some(listeners) = &self.listeners {
                listeners.notify(&PublishEvent::FeedLocked {
                    feed_id: feed_id.clone(),
                });
            }
        }
    }

    /// Unlocks a feed. Pending changes become eligible for a new debounce
    /// cycle on the next scheduler tick.
    pub fn unlock(&self, feed_id: &FeedId) {
        let was_locked = {
            let mut locked = match self.locked.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            locked.remove(feed_id)
        };
        if was_locked {
            tracing::debug!(feed = %feed_id, "feed unlocked");
            if let Some(listeners) = &self.listeners {
                listeners.notify(&PublishEvent::FeedUnlocked {
                    feed_id: feed_id.clone(),
                });
            }
        }
    }
}

impl LockOracle for LockRegistry {
    fn is_locked(&self, feed_id: &FeedId) -> bool {
        match self.locked.read() {
            Ok(guard) => guard.contains(feed_id),
            Err(poisoned) => poisoned.into_inner().contains(feed_id),
        }
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn lock_and_unlock_toggle_the_oracle() {
        let registry = LockRegistry::new();
        let id = FeedId::new("feed-1");

        assert!(!registry.is_locked(&id));
        registry.lock(&id);
        assert!(registry.is_locked(&id));
        registry.unlock(&id);
        assert!(!registry.is_locked(&id));
    }

    #[test]
    fn transitions_fire_events_exactly_once() {
        let listeners = Arc::new(PublishListeners::new());
        let locks = Arc::new(AtomicUsize::new(0));
        let unlocks = Arc::new(AtomicUsize::new(0));

        let (locks_clone, unlocks_clone) = (Arc::clone(&locks), Arc::clone(&unlocks));
        listeners.add(move |event| match event {
            PublishEvent::FeedLocked { .. } => {
                locks_clone.fetch_add(1, Ordering::SeqCst);
            }
            PublishEvent::FeedUnlocked { .. } => {
                unlocks_clone.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        });

        let registry = LockRegistry::with_listeners(listeners);
        let id = FeedId::new("feed-1");

        registry.lock(&id);
        registry.lock(&id); // already locked, no event
        registry.unlock(&id);
        registry.unlock(&id); // already unlocked, no event

        assert_eq!(locks.load(Ordering::SeqCst), 1);
        assert_eq!(unlocks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn locks_are_per_feed() {
        let registry = LockRegistry::new();
        registry.lock(&FeedId::new("a"));
        assert!(registry.is_locked(&FeedId::new("a")));
        assert!(!registry.is_locked(&FeedId::new("b")));
    }
}
