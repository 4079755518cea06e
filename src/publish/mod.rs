//! The debounce scheduler.
//!
//! One [`FeedPublisher`] per published feed. The worker polls the feed once
//! a second, fingerprints it, and publishes a snapshot once a detected
//! change has been quiet for the configured debounce delay. See
//! [`worker`] for the state machine itself.

pub mod config;
pub mod state;
pub mod worker;

pub use config::{DebounceDelay, PublisherConfig};
pub use state::PublishState;
pub use worker::{FeedPublisher, PublisherHandle};
