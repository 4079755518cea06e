//! Error types for the store boundary.
//!
//! The scheduler itself never fails hard: a bad tick is logged and the loop
//! carries on, and a failed publish simply leaves the content marked pending
//! so the next debounce cycle retries it. `PublishError` is what the store
//! adapter reports back when an insert cannot complete.

use thiserror::Error;

/// Errors returned by a [`StorePublisher`](crate::store::StorePublisher).
#[derive(Error, Debug)]
pub enum PublishError {
    /// The store could not be reached or the transfer broke off midway.
    /// Transient; the scheduler retries on the next debounce cycle.
    #[error("store transport error: {0}")]
    Transport(String),

    /// The store already holds an edition at or past the requested version.
    #[error("store rejected version {version}: a newer edition is already present")]
    Conflict { version: u64 },

    /// The feed has no insert target (e.g. a remote feed we only fetch).
    #[error("feed has no insert target")]
    NoInsertTarget,

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
