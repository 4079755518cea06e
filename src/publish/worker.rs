//! The per-feed debounce scheduler.
//!
//! One worker task per published feed. Each tick it fingerprints the feed,
//! compares against the last observed and last published fingerprints, and
//! once a change has been quiet for the debounce delay it captures a
//! snapshot and hands it to the store adapter. After a successful publish it
//! reconciles: if the feed changed again while the insert was in flight, a
//! new debounce cycle starts for the newer content.
//!
//! ## Correctness notes
//!
//! - Single-flight is structural: one worker, one sequential loop, so two
//!   publishes of the same feed can never overlap.
//! - The feed lock is held only for fingerprinting and snapshotting, never
//!   across the store call.
//! - A failed tick is logged and the loop continues; only the shutdown
//!   signal terminates the worker.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::data::fingerprint::Fingerprintable;
use crate::data::{FeedId, FeedStatus, SharedFeed};
use crate::events::{PublishEvent, PublishListeners};
use crate::locks::LockOracle;
use crate::publish::config::PublisherConfig;
use crate::publish::state::PublishState;
use crate::snapshot::FeedSnapshot;
use crate::store::{InsertTarget, StorePublisher};

/// Interval between scheduler ticks.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Debounce scheduler for one feed.
pub struct FeedPublisher {
    feed: SharedFeed,
    store: Arc<dyn StorePublisher>,
    locks: Arc<dyn LockOracle>,
    listeners: Arc<PublishListeners>,
    config: PublisherConfig,
    state: Arc<PublishState>,
}

/// Working state private to the scheduler loop (single writer).
#[derive(Default)]
struct TickState {
    /// Fingerprint seen on the previous change evaluation.
    last_observed: String,
    /// When the currently pending change was first observed, if the
    /// debounce timer is armed.
    change_pending_since: Option<Instant>,
}

impl FeedPublisher {
    pub fn new(
        feed: SharedFeed,
        store: Arc<dyn StorePublisher>,
        locks: Arc<dyn LockOracle>,
        listeners: Arc<PublishListeners>,
        config: PublisherConfig,
    ) -> Self {
        Self {
            feed,
            store,
            locks,
            listeners,
            config,
            state: Arc::new(PublishState::new()),
        }
    }

    /// Seeds the committed fingerprint, e.g. restored from the settings
    /// store, so content that is already published is not republished at
    /// startup.
    pub fn with_last_published(mut self, fingerprint: impl Into<String>) -> Self {
        self.state = Arc::new(PublishState::with_last_published(fingerprint));
        self
    }

    /// The observable state handle (`is_modified`, last published
    /// fingerprint). Safe to read from any thread.
    pub fn state(&self) -> Arc<PublishState> {
        Arc::clone(&self.state)
    }

    /// Spawns the scheduler on a tokio task and returns its lifecycle
    /// handle.
    pub fn spawn(self) -> PublisherHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = self.state();
        let join = tokio::spawn(async move {
            self.run(shutdown_rx).await;
        });
        PublisherHandle {
            shutdown_tx,
            join,
            state,
        }
    }

    /// Runs the scheduler loop until the shutdown signal is received.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let feed_id = self.feed.read().await.id().clone();
        tracing::info!(feed = %feed_id, "feed publisher started");

        let mut tick = TickState {
            // Start from the committed fingerprint: a feed whose content
            // still matches it needs no publish, a never-published feed
            // differs immediately and debounces from the first tick.
            last_observed: self.state.last_published_fingerprint(),
            change_pending_since: None,
        };

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            if let Err(e) = self.tick(&feed_id, &mut tick, &shutdown_rx).await {
                // A bad tick must never kill the scheduler.
                tracing::error!(feed = %feed_id, error = %e, "publish tick failed");
            }

            tokio::select! {
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        tracing::info!(feed = %feed_id, "feed publisher stopped");
    }

    /// One iteration of the state machine.
    async fn tick(
        &self,
        feed_id: &FeedId,
        tick: &mut TickState,
        shutdown_rx: &watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        // Administrative lock: no change evaluation, no publish. Keep the
        // `modified` flag truthful so unlocking immediately reflects pending
        // content, and disarm the timer so edits made while locked do not
        // count toward the quiet period.
        if self.locks.is_locked(feed_id) {
            let fingerprint = self.feed.read().await.fingerprint();
            self.state
                .set_modified(fingerprint != self.state.last_published_fingerprint());
            tick.change_pending_since = None;
            // Rewind the observation point to the committed fingerprint so
            // that content still pending at unlock time is re-detected as a
            // change and debounces from scratch.
            tick.last_observed = self.state.last_published_fingerprint();
            return Ok(());
        }

        let fingerprint = self.feed.read().await.fingerprint();
        if fingerprint != tick.last_observed {
            if fingerprint == self.state.last_published_fingerprint() {
                // The feed reverted to the last published state; nothing is
                // owed anymore.
                tracing::debug!(feed = %feed_id, "content reverted to published state");
                self.state.set_modified(false);
                tick.change_pending_since = None;
            } else {
                tracing::debug!(feed = %feed_id, "content change detected, debouncing");
                self.state.set_modified(true);
                tick.change_pending_since = Some(Instant::now());
            }
            tick.last_observed = fingerprint;
        }

        let delay = self.config.debounce.get();
        let due = self.state.is_modified()
            && tick
                .change_pending_since
                .is_some_and(|since| since.elapsed() >= delay);
        if !due {
            return Ok(());
        }

        self.publish_once(feed_id, tick, shutdown_rx).await;
        Ok(())
    }

    /// Captures a snapshot and runs one publish, including post-publish
    /// reconciliation.
    async fn publish_once(
        &self,
        feed_id: &FeedId,
        tick: &mut TickState,
        shutdown_rx: &watch::Receiver<bool>,
    ) {
        // Snapshot and fingerprint are captured in the same critical
        // section, so the speculative fingerprint describes exactly the
        // content being inserted.
        let (snapshot, target) = {
            let mut feed = self.feed.write().await;
            feed.set_status(FeedStatus::Publishing);
            let target = InsertTarget {
                feed_id: feed.id().clone(),
                version_hint: feed.latest_version() + 1,
            };
            (FeedSnapshot::capture(&feed), target)
        };
        let speculative = snapshot.fingerprint().to_string();

        self.listeners.notify(&PublishEvent::Started {
            feed_id: feed_id.clone(),
        });
        tracing::debug!(
            feed = %feed_id,
            version = target.version_hint,
            posts = snapshot.posts.len(),
            "publishing snapshot"
        );

        let started = Instant::now();
        let result = self.store.publish(&target, &snapshot).await;

        if *shutdown_rx.borrow() {
            // Stop was requested while the publish was in flight. Discard
            // the result: the committed fingerprint and version pointers
            // stay at their pre-publish values. Only the transient status
            // is restored.
            tracing::info!(feed = %feed_id, "stop requested during publish, discarding result");
            self.feed.write().await.set_status(FeedStatus::Idle);
            return;
        }

        match result {
            Ok(location) => {
                let duration = started.elapsed();
                {
                    let mut feed = self.feed.write().await;
                    feed.set_latest_version(location.version);
                    feed.set_time(chrono::Utc::now().timestamp_millis());
                    feed.set_status(FeedStatus::Idle);
                }
                self.state.set_last_published_fingerprint(&speculative);
                self.listeners.notify(&PublishEvent::Finished {
                    feed_id: feed_id.clone(),
                    duration,
                });
                tracing::info!(
                    feed = %feed_id,
                    version = location.version,
                    uri = %location.uri,
                    elapsed_ms = duration.as_millis() as u64,
                    "publish finished"
                );

                // Reconcile: did the feed change while the insert was in
                // flight?
                let current = self.feed.read().await.fingerprint();
                if current == speculative {
                    self.state.set_modified(false);
                    tick.change_pending_since = None;
                    tick.last_observed = current;
                } else {
                    // Edits happened during the publish. `modified` stays
                    // set and `last_observed` stays at the published value,
                    // so the next tick detects the newer content and arms a
                    // fresh debounce cycle.
                    tracing::debug!(feed = %feed_id, "content changed during publish, re-arming");
                    tick.change_pending_since = None;
                }
            }
            Err(e) => {
                self.feed.write().await.set_status(FeedStatus::Idle);
                self.listeners.notify(&PublishEvent::Aborted {
                    feed_id: feed_id.clone(),
                    cause: Some(e.to_string()),
                });
                // The committed fingerprint is untouched, so the content
                // stays pending and the next tick retries.
                tracing::warn!(feed = %feed_id, error = %e, "publish aborted, content stays pending");
            }
        }
    }
}

/// Lifecycle handle for a spawned [`FeedPublisher`].
pub struct PublisherHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
    state: Arc<PublishState>,
}

impl PublisherHandle {
    /// Requests a cooperative stop. The worker notices within one polling
    /// interval, or as soon as an in-flight publish returns.
    pub fn request_stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits until the worker task has terminated.
    pub async fn await_stopped(self) {
        let _ = self.join.await;
    }

    /// The observable scheduler state.
    pub fn state(&self) -> Arc<PublishState> {
        Arc::clone(&self.state)
    }

    /// Whether the feed currently differs from the last published content.
    pub fn is_modified(&self) -> bool {
        self.state.is_modified()
    }

    /// Fingerprint of the last successfully published content.
    pub fn last_published_fingerprint(&self) -> String {
        self.state.last_published_fingerprint()
    }
}
