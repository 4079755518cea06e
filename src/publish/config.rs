//! Scheduler configuration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default quiet period before a changed feed is published.
const DEFAULT_DEBOUNCE_SECS: u64 = 60;

/// Live-tunable debounce delay.
///
/// The delay is shared behind an atomic so the host can adjust it at
/// runtime; a new value takes effect at the next tick evaluation, no restart
/// needed. Clones observe the same value, which lets one knob drive several
/// schedulers without reintroducing process-global state.
#[derive(Debug, Clone)]
pub struct DebounceDelay(Arc<AtomicU64>);

impl DebounceDelay {
    pub fn from_secs(secs: u64) -> Self {
        Self(Arc::new(AtomicU64::new(secs)))
    }

    pub fn get(&self) -> Duration {
        Duration::from_secs(self.0.load(Ordering::Relaxed))
    }

    /// Updates the delay. Takes effect on the next tick.
    pub fn set_secs(&self, secs: u64) {
        self.0.store(secs, Ordering::Relaxed);
    }
}

impl Default for DebounceDelay {
    fn default() -> Self {
        Self::from_secs(DEFAULT_DEBOUNCE_SECS)
    }
}

/// Configuration for one [`FeedPublisher`](super::FeedPublisher).
#[derive(Debug, Clone, Default)]
pub struct PublisherConfig {
    /// Quiet period after the last detected change before publishing.
    pub debounce: DebounceDelay,
}

impl PublisherConfig {
    pub fn with_debounce_secs(secs: u64) -> Self {
        Self {
            debounce: DebounceDelay::from_secs(secs),
        }
    }

    /// Load from environment variables (`FEEDCAST_DEBOUNCE_SECS`).
    pub fn from_env() -> Self {
        let secs = std::env::var("FEEDCAST_DEBOUNCE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_SECS);
        Self::with_debounce_secs(secs)
    }
}
