//! Externally observable scheduler state.
//!
//! The scheduler's working state is private to its own task; the only pieces
//! other threads may read are the "needs publish" flag and the fingerprint
//! of the last successfully published content. Both are single-writer (the
//! scheduler) and many-reader, so an atomic and a short-held mutex are
//! enough; no lock spans the whole state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Shared observable state of one feed's scheduler.
#[derive(Debug, Default)]
pub struct PublishState {
    modified: AtomicBool,
    last_published: Mutex<String>,
}

impl PublishState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the committed fingerprint, e.g. restored from the settings
    /// store at startup so an unchanged feed is not republished.
    pub fn with_last_published(fingerprint: impl Into<String>) -> Self {
        Self {
            modified: AtomicBool::new(false),
            last_published: Mutex::new(fingerprint.into()),
        }
    }

    /// Whether the feed currently differs from the last published content.
    pub fn is_modified(&self) -> bool {
        self.modified.load(Ordering::Acquire)
    }

    pub(crate) fn set_modified(&self, modified: bool) {
        self.modified.store(modified, Ordering::Release);
    }

    /// Fingerprint of the last successfully published content. Empty until
    /// the first publish (or seed).
    pub fn last_published_fingerprint(&self) -> String {
        match self.last_published.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn set_last_published_fingerprint(&self, fingerprint: &str) {
        let mut guard = match self.last_published.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clear();
        guard.push_str(fingerprint);
    }
}
