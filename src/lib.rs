//! Feedcast - debounced feed publishing
//!
//! This crate owns the core of a distributed microblogging node: deciding
//! *when* to publish a user's feed into the content-addressed store. A feed
//! is mutated continuously by the rest of the application; publishing every
//! edit would flood the store, so each feed gets a background scheduler that
//! fingerprints the feed's content, waits for edits to settle behind a
//! configurable quiet period, and then hands a consistent snapshot to the
//! store adapter.
//!
//! ## Architecture
//! Feed mutation -> fingerprint change detected -> debounce timer ->
//! snapshot captured under lock -> `StorePublisher` insert -> reconcile
//!
//! Rendering, transport, and identity are external collaborators behind the
//! `StorePublisher` and `LockOracle` traits; lifecycle transitions fan out
//! through `PublishListeners`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use feedcast::{Feed, FeedId, FeedPublisher, PublisherConfig};
//! use feedcast::events::PublishListeners;
//! use feedcast::locks::LockRegistry;
//! # use feedcast::store::{InsertTarget, StoreLocation, StorePublisher};
//! # use feedcast::snapshot::FeedSnapshot;
//! # use feedcast::error::PublishError;
//! # struct NullStore;
//! # #[async_trait::async_trait]
//! # impl StorePublisher for NullStore {
//! #     async fn publish(
//! #         &self,
//! #         target: &InsertTarget,
//! #         _snapshot: &FeedSnapshot,
//! #     ) -> Result<StoreLocation, PublishError> {
//! #         Ok(StoreLocation { version: target.version_hint, uri: String::new() })
//! #     }
//! # }
//!
//! # #[tokio::main] async fn main() {
//! let feed = Feed::new(FeedId::new("alice"), "Alice").into_shared();
//! let publisher = FeedPublisher::new(
//!     feed,
//!     Arc::new(NullStore),
//!     Arc::new(LockRegistry::new()),
//!     Arc::new(PublishListeners::new()),
//!     PublisherConfig::default(),
//! );
//! let handle = publisher.spawn();
//! // ... application runs, mutating the feed ...
//! handle.request_stop();
//! handle.await_stopped().await;
//! # }
//! ```

// Core error handling
pub mod error;

// The feed aggregate and its value types
pub mod data;

// Immutable publish snapshots
pub mod snapshot;

// Store adapter interface
pub mod store;

// Publish lifecycle events and listener registry
pub mod events;

// Administrative feed locking
pub mod locks;

// The debounce scheduler
pub mod publish;

// Public re-exports for the common path
pub use data::{Feed, FeedId, FeedStatus, SharedFeed};
pub use data::fingerprint::Fingerprintable;
pub use publish::{DebounceDelay, FeedPublisher, PublisherConfig, PublisherHandle, PublishState};
pub use snapshot::FeedSnapshot;
