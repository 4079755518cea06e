//! Shared helpers for the scheduler integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use feedcast::error::PublishError;
use feedcast::events::{PublishEvent, PublishListeners};
use feedcast::snapshot::FeedSnapshot;
use feedcast::store::{InsertTarget, StoreLocation, StorePublisher};
use feedcast::{Feed, FeedId};

/// Store stub that records every publish it receives.
///
/// Supports an artificial per-call latency (virtual time, the tests run with
/// a paused clock) and a number of initial calls that fail with a transport
/// error.
pub struct RecordingPublisher {
    calls: Mutex<Vec<(InsertTarget, FeedSnapshot)>>,
    attempts: AtomicU32,
    fail_remaining: AtomicU32,
    delay_ms: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            attempts: AtomicU32::new(0),
            fail_remaining: AtomicU32::new(0),
            delay_ms: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    /// Fail the first `times` publish attempts with a transport error.
    pub fn fail_first(self: Arc<Self>, times: u32) -> Arc<Self> {
        self.fail_remaining.store(times, Ordering::SeqCst);
        self
    }

    /// Make every publish take `ms` milliseconds of (virtual) time.
    pub fn with_delay_ms(self: Arc<Self>, ms: u64) -> Arc<Self> {
        self.delay_ms.store(ms, Ordering::SeqCst);
        self
    }

    /// Successful publishes so far.
    pub fn successes(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All publish attempts, including failed ones.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Snapshots of the successful publishes, in order.
    pub fn snapshots(&self) -> Vec<FeedSnapshot> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, snapshot)| snapshot.clone())
            .collect()
    }

    /// Highest number of publishes ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorePublisher for RecordingPublisher {
    async fn publish(
        &self,
        target: &InsertTarget,
        snapshot: &FeedSnapshot,
    ) -> Result<StoreLocation, PublishError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let should_fail = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if should_fail {
            return Err(PublishError::Transport("store unreachable".into()));
        }

        self.calls
            .lock()
            .unwrap()
            .push((target.clone(), snapshot.clone()));
        Ok(StoreLocation {
            version: target.version_hint,
            uri: format!("cas://{}/{}", target.feed_id, target.version_hint),
        })
    }
}

/// Collects every event fired through the registry.
pub fn collect_events(listeners: &PublishListeners) -> Arc<Mutex<Vec<PublishEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    listeners.add(move |event| events_clone.lock().unwrap().push(event.clone()));
    events
}

pub fn test_feed() -> Feed {
    Feed::new(FeedId::new("feed-under-test"), "Feed Under Test")
}

/// Advance the (paused) clock by `ms` milliseconds, letting the worker run.
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
